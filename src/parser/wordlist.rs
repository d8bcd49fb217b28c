/// Words of a newline-separated list, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with
/// `#` are skipped, the same format as personal word lists.
pub fn parse_word_list(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}
