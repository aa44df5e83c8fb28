//! Problem keyword normalization.

/// Canonical form of a reported problem: trimmed, first character
/// upper-cased, the rest lower-cased ("FEVER " → "Fever").
pub fn normalize_problem(problem: &str) -> String {
    let mut chars = problem.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
