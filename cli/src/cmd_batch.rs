//! `argcodec decode-batch`: decode many payloads against one argument list.

use anyhow::{Context, Result};
use argcodec_abi::Arguments;
use rayon::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::{decode_hex, decode_keyed, value_json};

pub fn run(args: &Arguments, input: &Path, threads: usize) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("read batch input '{}'", input.display()))?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    let start = Instant::now();
    let results: Vec<Value> = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| decode_line(args, index, line))
        .collect();
    let elapsed = start.elapsed();

    let mut errors = 0usize;
    for result in &results {
        if result.get("error").is_some() {
            errors += 1;
        }
        println!("{}", serde_json::to_string(result)?);
    }
    info!(
        payloads = results.len(),
        errors,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch decode finished"
    );
    if errors > 0 {
        anyhow::bail!("{} of {} payloads failed to decode", errors, results.len());
    }
    Ok(())
}

fn decode_line(args: &Arguments, index: usize, line: &str) -> Value {
    match decode_hex(line).and_then(|bytes| decode_keyed(args, &bytes)) {
        Ok(decoded) => {
            let named: serde_json::Map<String, Value> = decoded
                .iter()
                .map(|(key, arg, value)| (key.clone(), value_json(arg, value)))
                .collect();
            json!({ "index": index, "values": named })
        }
        Err(e) => json!({ "index": index, "error": format!("{e:#}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use argcodec_abi::{Argument, DynSolType, DynSolValue};

    #[test]
    fn decodes_good_line_and_reports_bad_one() {
        let args = Arguments::new(vec![
            Argument::new("amount", DynSolType::Uint(256)),
            Argument::new("", DynSolType::Bool),
        ]);
        let data = args
            .pack(&[DynSolValue::Uint(U256::from(10u64), 256), DynSolValue::Bool(true)])
            .unwrap();

        let ok = decode_line(&args, 0, &format!("0x{}", hex::encode(&data)));
        assert_eq!(ok["values"]["amount"], "10");
        assert_eq!(ok["values"]["1"], true);

        let bad = decode_line(&args, 1, "0xzz");
        assert_eq!(bad["index"], 1);
        assert!(bad["error"].as_str().unwrap().contains("invalid hex"));
    }
}
