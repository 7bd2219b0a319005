//! Ignore-region removal

use super::ChecklistSyntax;

/// Remove every ignore region from `text`
///
/// A region runs from the start marker through the nearest end marker after
/// it, markers included. A start marker with no end marker after it swallows
/// the rest of the text. Matching is literal and case-sensitive; the scan
/// restarts from the top after each removal, so the result never contains a
/// start marker.
pub fn strip(text: &str, syntax: &ChecklistSyntax) -> String {
    let start = syntax.ignore_start.as_str();
    let end = syntax.ignore_end.as_str();

    if start.is_empty() {
        return text.to_string();
    }

    let mut out = text.to_string();
    while let Some(open) = out.find(start) {
        let after_open = open + start.len();
        let close = match out[after_open..].find(end) {
            Some(offset) if !end.is_empty() => after_open + offset + end.len(),
            _ => out.len(),
        };
        out.replace_range(open..close, "");
    }

    out
}
