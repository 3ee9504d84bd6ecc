//! Label-anchored section heuristics.
//!
//! Station pages have no formal grammar. A section starts at a label line
//! ("Adresse", "Åbningstider") and runs until the next line that looks like
//! a heading. Short capitalized phrases that are not real headings also end
//! a section; that is accepted behavior.

/// Longest line, in characters, that can still be a heading.
const MAX_HEADING_CHARS: usize = 45;

const ADDRESS_LABEL: &str = "Adresse";
const OPENING_HOURS_LABEL: &str = "Åbningstider";

/// Number of lines after the address label that may hold the address.
const ADDRESS_MAX_LINES: usize = 2;

/// Whether a line looks like a section heading.
pub fn is_heading(line: &str) -> bool {
    if line.chars().count() > MAX_HEADING_CHARS {
        return false;
    }
    if line.contains(':') {
        return false;
    }

    let mut words = line.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }
    words.all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

/// Index of the first line equal to `label`, ignoring case.
pub fn find_label_index<S: AsRef<str>>(lines: &[S], label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    lines
        .iter()
        .position(|line| line.as_ref().to_lowercase() == label)
}

/// Address lines following the "Adresse" label, joined with ", ".
pub fn find_address<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let index = find_label_index(lines, ADDRESS_LABEL)?;

    let candidates: Vec<&str> = lines[index + 1..]
        .iter()
        .take(ADDRESS_MAX_LINES)
        .map(|line| line.as_ref())
        .filter(|line| !line.is_empty() && !is_heading(line))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates.join(", "))
}

/// Lines with a ':' between the "Åbningstider" label and the next heading.
pub fn find_opening_hours<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let Some(index) = find_label_index(lines, OPENING_HOURS_LABEL) else {
        return Vec::new();
    };

    lines[index + 1..]
        .iter()
        .map(|line| line.as_ref())
        .take_while(|line| !is_heading(line))
        .filter(|line| line.contains(':'))
        .map(str::to_string)
        .collect()
}
