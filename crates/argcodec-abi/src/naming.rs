//! Identifier helpers shared by field resolution and code generators.

/// Upper-case the first character, dropping any leading underscores.
pub fn capitalise(input: &str) -> String {
    let trimmed = input.trim_start_matches('_');
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `under_score_name` → `UnderScoreName`.
pub fn to_camel_case(input: &str) -> String {
    input
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
