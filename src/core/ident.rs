//! DOI and identifier shape checks

use regex::Regex;
use std::sync::OnceLock;

// DataCite DOIs: "10." + 4-9 digit registrant code + "/" + suffix.
fn doi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^10\.\d{4,9}/\S+$").expect("pattern is valid"))
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("pattern is valid"))
}

/// Check that a string looks like a DOI (e.g. "10.26311/some-suffix")
pub fn is_doi(s: &str) -> bool {
    doi_regex().is_match(s)
}

/// Check that a string is a valid identifier (usable for attribute-style access)
pub fn is_identifier(s: &str) -> bool {
    identifier_regex().is_match(s)
}
