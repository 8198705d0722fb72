//! Text cleanup shared by the normalizers

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::dataset::RawRecord;

lazy_static! {
    /// Placeholder phrases data-entry tools put in empty fields
    static ref PLACEHOLDERS: Regex =
        Regex::new(r"(?i)(not\s*available|not\s*provided|n/a)").expect("valid placeholder regex");
    static ref NEWLINES: Regex = Regex::new(r"\n+").expect("valid newline regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Join the given columns of a record with single spaces.
///
/// With `mark_street`, a comma follows every column whose name mentions
/// "street" so the tagger sees a break before city/state/zip.
pub(crate) fn concat_columns<R, S>(record: &R, columns: &[S], mark_street: bool) -> String
where
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    column_names(columns)
        .map(|col| {
            let value = record.get(col).unwrap_or("");
            if mark_street && col.to_lowercase().contains("street") {
                format!("{},", value)
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Column names as plain string slices
pub(crate) fn column_names<S: AsRef<str>>(columns: &[S]) -> impl Iterator<Item = &str> {
    columns.iter().map(|c| c.as_ref())
}

/// Drop placeholder phrases, turn line breaks into commas, collapse whitespace
pub(crate) fn clean_free_text(text: &str) -> String {
    let stripped = PLACEHOLDERS.replace_all(text, "");
    let flattened = NEWLINES.replace_all(&stripped, ", ");
    collapse_whitespace(&flattened)
}

/// Put spaces around `/` and `\` unless they sit between two digits (`1/2`)
pub(crate) fn space_slashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c == '/' || c == '\\' {
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !(prev_digit && next_digit) {
                result.push_str(" / ");
                continue;
            }
        }
        result.push(c);
    }

    collapse_whitespace(&result)
}

/// Collapse runs of whitespace into a single space and trim
pub(crate) fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Trimmed value, or `None` when nothing is left
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Case, accent, and whitespace insensitive form used for exact comparison.
///
/// Only combining marks are dropped after decomposition; letters from any
/// script are kept.
pub fn comparison_key(value: &str) -> String {
    let folded: String = value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    collapse_whitespace(&folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_placeholders_are_removed() {
        assert_eq!(clean_free_text("Not Available 12 Main St"), "12 Main St");
        assert_eq!(clean_free_text("N/A"), "");
        assert_eq!(clean_free_text("notprovided Bob"), "Bob");
    }

    #[test]
    fn test_newlines_become_commas() {
        assert_eq!(clean_free_text("12 Main St\n\nSpringfield"), "12 Main St, Springfield");
    }

    #[test]
    fn test_slashes_spaced_except_fractions() {
        assert_eq!(space_slashes("12 1/2 Main St"), "12 1/2 Main St");
        assert_eq!(space_slashes("Hwy/Route 9"), "Hwy / Route 9");
        assert_eq!(space_slashes("Unit 4/B"), "Unit 4 / B");
        assert_eq!(space_slashes("A\\7"), "A / 7");
    }

    #[test]
    fn test_concat_marks_street_columns() {
        let mut record = HashMap::new();
        record.insert("Street Address".to_string(), "1 Elm St".to_string());
        record.insert("City".to_string(), "Reno".to_string());

        let text = concat_columns(&record, &["Street Address", "City", "Zip"], true);
        assert_eq!(text, "1 Elm St, Reno ");

        let plain = concat_columns(&record, &["Street Address", "City"], false);
        assert_eq!(plain, "1 Elm St Reno");
    }

    #[test]
    fn test_comparison_key_folds_case_and_accents() {
        assert_eq!(comparison_key("  José   GARCÍA "), "jose garcia");
    }

    #[test]
    fn test_comparison_key_keeps_other_scripts() {
        assert_eq!(comparison_key("李 Smith"), "李 smith");
        assert_ne!(comparison_key("李 Smith"), comparison_key("王 Smith"));
        assert_eq!(comparison_key("Пётр"), "петр");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
