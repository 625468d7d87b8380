//! Fork and rear notes combining

/// Merge the fork and rear annotation fields into one notes line.
///
/// Inputs are trimmed; an input that is empty after trimming is absent.
#[must_use]
pub fn combine(fork_info: &str, rear_info: &str) -> String {
    match (fork_info.trim(), rear_info.trim()) {
        ("", "") => String::new(),
        (fork, "") => format!("F: {fork}"),
        ("", rear) => format!("R: {rear}"),
        (fork, rear) => format!("F: {fork} / R: {rear}"),
    }
}
