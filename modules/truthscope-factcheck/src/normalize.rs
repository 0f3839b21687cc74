/// Lowercase `text` and drop everything that is not `a-z`, `0-9`, or a space.
///
/// ASCII only: accented letters are lowercased and then removed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}
