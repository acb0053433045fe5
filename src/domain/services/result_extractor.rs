/// Marker the genlang interpreter prints in front of the evaluated expression.
pub const EXPRESS_REAL_MARKER: &str = "Express Real:";

/// Pulls the significant result line out of raw interpreter output.
pub struct ResultExtractor;

impl ResultExtractor {
    /// Returns the trimmed text after the first `Express Real:` line.
    ///
    /// Only the first marker line is considered; if its remainder is empty the
    /// output is treated as having no result at all.
    pub fn extract(raw_output: &str) -> Option<String> {
        let remainder = raw_output
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(EXPRESS_REAL_MARKER))?
            .trim();

        if remainder.is_empty() {
            None
        } else {
            Some(remainder.to_string())
        }
    }
}
