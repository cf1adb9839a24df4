//! Scanning of pdflatex console output for error lines.

/// Prefix pdflatex puts in front of LaTeX-level errors.
pub const ERROR_MARKER: &str = "! LaTeX Error:";

/// Collect every line starting with [`ERROR_MARKER`], marker and leading blanks removed.
pub fn extract_latex_errors(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix(ERROR_MARKER))
        .map(|rest| rest.trim_start().to_string())
        .collect()
}
