use crate::domain::model::Marker;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// A backend marker starts a line, after optional spaces or tabs. The
// identifier runs to the end of the line; a trailing `\r` is not part of it.
static BACKEND_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*!!! backend:([^\r\n]*)").expect("backend marker pattern")
});

/// Distinct backend identifiers, in the order they first appear.
pub fn backend_identifiers(markdown: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    BACKEND_LINE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|identifier| seen.insert(*identifier))
        .map(str::to_string)
        .collect()
}

/// Every marker present in `markdown`: backends first, then contracts, then specs.
pub fn scan(markdown: &str) -> Vec<Marker> {
    let mut markers: Vec<Marker> = backend_identifiers(markdown)
        .into_iter()
        .map(Marker::Backend)
        .collect();

    if markdown.contains(Marker::CONTRACTS) {
        markers.push(Marker::Contracts);
    }
    if markdown.contains(Marker::SPECS) {
        markers.push(Marker::Specs);
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_indented_marker() {
        let markdown = "# Title\n\n    !!! backend:concepts.Patients\n\nText\n";
        assert_eq!(backend_identifiers(markdown), vec!["concepts.Patients"]);
    }

    #[test]
    fn test_duplicates_reported_once_in_first_seen_order() {
        let markdown = "\n!!! backend:b\n!!! backend:a\n!!! backend:b\n";
        assert_eq!(backend_identifiers(markdown), vec!["b", "a"]);
    }

    #[test]
    fn test_first_and_last_lines_are_detected() {
        assert_eq!(backend_identifiers("!!! backend:first"), vec!["first"]);
        assert_eq!(backend_identifiers("text\n!!! backend:last"), vec!["last"]);
    }

    #[test]
    fn test_identifier_is_not_trimmed_but_excludes_carriage_return() {
        assert_eq!(backend_identifiers("\r\n!!! backend:a.b \r\n"), vec!["a.b "]);
    }

    #[test]
    fn test_mid_line_and_malformed_markers_are_ignored() {
        let markdown = "see !!! backend:inline\n!!!backend:nospace\n!!! Backend:case\n";
        assert!(backend_identifiers(markdown).is_empty());
    }

    #[test]
    fn test_scan_lists_all_kinds() {
        let markdown = "!!! specs\n\n!!! backend:x\n\n!!! contracts\n";
        assert_eq!(
            scan(markdown),
            vec![
                Marker::Backend("x".to_string()),
                Marker::Contracts,
                Marker::Specs
            ]
        );
        assert!(scan("no markers here").is_empty());
    }
}
