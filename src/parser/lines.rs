//! Input Decoding
//!
//! Turns raw volume content into clean text lines before any validation.
//! Line endings never reach the checks, and a UTF-8 byte order mark is
//! stripped from the first line only.

/// Iterate over the normalized lines of a volume file
pub fn normalized_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().enumerate().map(|(index, line)| {
        if index == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(line)
        } else {
            line
        }
    })
}
