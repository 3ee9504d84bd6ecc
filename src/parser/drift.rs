//! Status line extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::DriftState;

static DRIFT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Åben|Lukket|Midlertidigt lukket)\.\s*(.*)$")
        .expect("drift pattern is a valid regex")
});

/// Find the first status line and split it into state and message.
///
/// Later status lines are ignored. A message that is empty after trimming
/// is reported as absent.
pub fn extract_drift<S: AsRef<str>>(lines: &[S]) -> (Option<DriftState>, Option<String>) {
    for line in lines {
        let Some(caps) = DRIFT_PATTERN.captures(line.as_ref()) else {
            continue;
        };

        let state = caps.get(1).and_then(|m| DriftState::from_label(m.as_str()));
        let message = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        return (state, message);
    }

    (None, None)
}
