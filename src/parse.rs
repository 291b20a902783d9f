use std::num::ParseIntError;

/// Splits a line on whitespace and parses every token as a base-10 signed integer.
///
/// Empty tokens are skipped, so a blank line yields an empty vector.
pub fn parse_line_ints(line: &str) -> Result<Vec<i64>, ParseIntError> {
    line.split_whitespace()
        .map(|token| token.parse::<i64>())
        .collect()
}

/// Iterates over the lines of `text`, treating `\n`, `\r\n` and a lone `\r`
/// each as one line break. A trailing break does not start an empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                let line = &rest[..pos];
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}
