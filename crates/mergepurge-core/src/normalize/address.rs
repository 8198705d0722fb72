//! Postal address normalization

use crate::dataset::RawRecord;
use crate::error::AmbiguousLabel;
use crate::tagging::{resolve_address, AddressLabel, AddressTagger, LabelMap};

use super::states::valid_state;
use super::text::{clean_free_text, column_names, concat_columns, non_empty, space_slashes};
use super::Strictness;

/// Address components useful for comparing contacts.
///
/// Drops "address 2" style content (c/o lines, PO boxes) and street
/// suffixes, so this is not a deliverable mailing address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    /// The cleaned text handed to the tagger
    pub full_address: Option<String>,
}

/// Street components, in the order they are joined
const STREET_PARTS: [AddressLabel; 3] = [
    AddressLabel::StreetNamePreModifier,
    AddressLabel::StreetNamePreType,
    AddressLabel::StreetName,
];

/// Build the tagger input from the address columns of a record
pub fn address_text<R, S>(record: &R, columns: &[S]) -> String
where
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    let cleaned = space_slashes(&clean_free_text(&concat_columns(record, columns, true)));
    if cleaned.chars().any(char::is_alphanumeric) {
        cleaned
    } else {
        String::new()
    }
}

/// Parse the address columns of a record.
///
/// In lenient mode a repeated label is resolved by keeping the last house
/// number, street name and state in reading order; city and zip are left
/// empty for that record. A missing state falls back to the raw value of any
/// "state" column when it is a valid abbreviation.
pub fn normalize_address<T, R, S>(
    tagger: &T,
    record: &R,
    columns: &[S],
    strictness: Strictness,
) -> Result<AddressParts, AmbiguousLabel<AddressLabel>>
where
    T: AddressTagger + ?Sized,
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    let cleaned = address_text(record, columns);

    let parsed = if cleaned.is_empty() {
        LabelMap::new()
    } else {
        match tagger.tag(&cleaned) {
            Ok(map) => map,
            Err(err) if strictness == Strictness::Strict => return Err(err),
            Err(err) => {
                let resolution = resolve_address(&err.tokens);
                tracing::debug!(
                    label = %err.label,
                    conflicts = ?resolution.conflicting_values,
                    "address tagger repeated a label, keeping last values"
                );
                resolution.mapping
            }
        }
    };

    let street = STREET_PARTS
        .iter()
        .filter_map(|label| parsed.get(label))
        .collect::<Vec<_>>()
        .join(" ");

    let mut state = parsed.get(&AddressLabel::StateName).and_then(non_empty);
    if state.is_none() {
        state = column_names(columns)
            .filter(|col| col.to_lowercase().contains("state"))
            .filter_map(|col| record.get(col))
            .find_map(valid_state);
        if let Some(code) = &state {
            tracing::trace!(state = %code, "state taken from raw column");
        }
    }

    Ok(AddressParts {
        street_number: parsed.get(&AddressLabel::AddressNumber).and_then(non_empty),
        street: non_empty(&street),
        city: parsed.get(&AddressLabel::PlaceName).and_then(non_empty),
        state,
        zip: parsed.get(&AddressLabel::ZipCode).and_then(non_empty),
        full_address: non_empty(&cleaned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::Token;
    use std::collections::HashMap;

    /// Tags "<number> <words...> , <city> <ST> <zip>" shaped input
    fn fake_tagger(text: &str) -> Vec<Token<AddressLabel>> {
        let mut tokens = Vec::new();
        let mut after_comma = false;
        for word in text.split_whitespace() {
            let trimmed = word.trim_end_matches(',');
            let label = if word == "," {
                after_comma = true;
                continue;
            } else if trimmed.chars().all(|c| c.is_ascii_digit()) && trimmed.len() == 5 {
                AddressLabel::ZipCode
            } else if trimmed.chars().all(|c| c.is_ascii_digit()) {
                AddressLabel::AddressNumber
            } else if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_uppercase()) {
                AddressLabel::StateName
            } else if after_comma {
                AddressLabel::PlaceName
            } else if trimmed == "Hwy" {
                AddressLabel::StreetNamePreType
            } else {
                AddressLabel::StreetName
            };
            tokens.push(Token::new(trimmed, label));
            if word.ends_with(',') {
                after_comma = true;
            }
        }
        tokens
    }

    fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_address() {
        let rec = record(&[
            ("street", "123 Main"),
            ("city", "Reno"),
            ("state", "NV"),
            ("zip", "89501"),
        ]);
        let parts = normalize_address(
            &fake_tagger,
            &rec,
            &["street", "city", "state", "zip"],
            Strictness::Strict,
        )
        .unwrap();

        assert_eq!(parts.street_number.as_deref(), Some("123"));
        assert_eq!(parts.street.as_deref(), Some("Main"));
        assert_eq!(parts.city.as_deref(), Some("Reno"));
        assert_eq!(parts.state.as_deref(), Some("NV"));
        assert_eq!(parts.zip.as_deref(), Some("89501"));
        assert_eq!(parts.full_address.as_deref(), Some("123 Main, Reno NV 89501"));
    }

    #[test]
    fn test_street_joins_pre_type() {
        let rec = record(&[("street", "9 Hwy 50")]);
        let tagger = |text: &str| -> Vec<Token<AddressLabel>> {
            text.split_whitespace()
                .map(|w| w.trim_end_matches(','))
                .zip([
                    AddressLabel::AddressNumber,
                    AddressLabel::StreetNamePreType,
                    AddressLabel::StreetName,
                ])
                .map(|(w, l)| Token::new(w, l))
                .collect()
        };
        let parts = normalize_address(&tagger, &rec, &["street"], Strictness::Strict).unwrap();
        assert_eq!(parts.street.as_deref(), Some("Hwy 50"));
    }

    #[test]
    fn test_ambiguous_state_strict_vs_lenient() {
        let rec = record(&[("address", "12 Oak CA 89501 NV")]);
        let columns = ["address"];

        let err = normalize_address(&fake_tagger, &rec, &columns, Strictness::Strict).unwrap_err();
        assert_eq!(err.label, AddressLabel::StateName);

        let parts =
            normalize_address(&fake_tagger, &rec, &columns, Strictness::Lenient).unwrap();
        assert_eq!(parts.street_number.as_deref(), Some("12"));
        assert_eq!(parts.street.as_deref(), Some("Oak"));
        assert_eq!(parts.state.as_deref(), Some("NV"));
        assert_eq!(parts.city, None);
        assert_eq!(parts.zip, None);
    }

    #[test]
    fn test_lenient_keeps_last_house_number() {
        let rec = record(&[("address", "12 Oak 34 Pine")]);
        let parts =
            normalize_address(&fake_tagger, &rec, &["address"], Strictness::Lenient).unwrap();
        assert_eq!(parts.street_number.as_deref(), Some("34"));
        assert_eq!(parts.street.as_deref(), Some("Pine"));
        assert_eq!(parts.state, None);
    }

    #[test]
    fn test_state_falls_back_to_valid_raw_column() {
        let tagger = |text: &str| -> Vec<Token<AddressLabel>> {
            text.split_whitespace()
                .map(|w| Token::new(w, AddressLabel::PlaceName))
                .collect()
        };
        let good = record(&[("city", "Fresno"), ("State", "ca ")]);
        let parts = normalize_address(&tagger, &good, &["city", "State"], Strictness::Strict)
            .unwrap();
        assert_eq!(parts.state.as_deref(), Some("CA"));
    }

    #[test]
    fn test_invalid_raw_state_never_used() {
        let tagger = |_: &str| -> Vec<Token<AddressLabel>> {
            vec![Token::new("Fresno", AddressLabel::PlaceName)]
        };
        for raw in ["Zz", "CAL", "C.A."] {
            let rec = record(&[("city", "Fresno"), ("state", raw)]);
            let parts =
                normalize_address(&tagger, &rec, &["city", "state"], Strictness::Strict).unwrap();
            assert_eq!(parts.state, None, "raw state {raw:?} must be rejected");
        }
    }

    #[test]
    fn test_placeholder_only_record_is_empty() {
        let rec = record(&[("street", "Not Available"), ("city", "n/a")]);
        let parts = normalize_address(&fake_tagger, &rec, &["street", "city"], Strictness::Strict)
            .unwrap();
        assert_eq!(parts, AddressParts::default());
    }
}
