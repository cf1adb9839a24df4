//! Utilities (line normalization, timestamp formatting).

pub mod time;

pub use time::format_timestamp;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Split a block of text into trimmed, non-blank lines.
///
/// Indentation from inline templates is dropped so the written file starts at column zero.
pub fn string_to_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Join lines with the platform line ending, terminating the last one too.
pub fn join_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push_str(LINE_ENDING);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_lines_trims_and_drops_blanks() {
        let text = "\n    \\begin{axis}[\n      grid=major,\n\n    ]\n   ";
        assert_eq!(string_to_lines(text), vec!["\\begin{axis}[", "grid=major,", "]"]);
    }

    #[test]
    fn test_join_lines_terminates_every_line() {
        let joined = join_lines(&["a", "b"]);
        assert_eq!(joined, format!("a{LINE_ENDING}b{LINE_ENDING}"));
        assert_eq!(join_lines(&[]), "");
    }
}
