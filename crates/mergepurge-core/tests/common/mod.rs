//! Shared fixtures: deterministic taggers and fixture files

use std::path::PathBuf;

use mergepurge_core::dataset::Dataset;
use mergepurge_core::normalize::{ColumnGroups, IdentityNormalizer};
use mergepurge_core::tagging::{AddressLabel, NameLabel, ParserMode, Token};

pub type FakeNormalizer = IdentityNormalizer<
    fn(&str) -> Vec<Token<AddressLabel>>,
    fn(&str, ParserMode) -> Vec<Token<NameLabel>>,
>;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a tab-separated fixture
#[allow(dead_code)]
pub fn load_tsv_fixture(name: &str) -> Dataset {
    Dataset::from_tsv_path(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Tags "<number> <street words>, <city words> <ST> <zip>" shaped input.
/// A comma before any street word (as in "12, Main St") does not end the street.
pub fn address_tagger(text: &str) -> Vec<Token<AddressLabel>> {
    let mut tokens = Vec::new();
    let mut after_comma = false;
    let mut seen_street = false;

    for word in text.split_whitespace() {
        if word == "," {
            after_comma = seen_street;
            continue;
        }
        let trimmed = word.trim_end_matches(',');
        let digits = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());

        let label = if digits && trimmed.len() == 5 {
            AddressLabel::ZipCode
        } else if digits {
            AddressLabel::AddressNumber
        } else if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_uppercase()) {
            AddressLabel::StateName
        } else if after_comma {
            AddressLabel::PlaceName
        } else {
            seen_street = true;
            AddressLabel::StreetName
        };
        tokens.push(Token::new(trimmed, label));

        if word.ends_with(',') && seen_street {
            after_comma = true;
        }
    }

    tokens
}

/// Person mode: optional title, given name, then surname words.
/// Other modes: legal suffixes and "&" apart, everything else is the
/// corporation name.
pub fn name_tagger(text: &str, mode: ParserMode) -> Vec<Token<NameLabel>> {
    let mut tokens = Vec::new();
    let mut position = 0;

    for word in text.split_whitespace() {
        let label = match mode {
            ParserMode::Person => match word {
                "Dr." | "Mr." | "Ms." => NameLabel::PrefixOther,
                _ => {
                    position += 1;
                    if position == 1 {
                        NameLabel::GivenName
                    } else {
                        NameLabel::Surname
                    }
                }
            },
            _ => match word {
                "LLC" | "Inc" | "Corp" | "Co" => NameLabel::CorporationLegalType,
                "&" => NameLabel::And,
                _ => NameLabel::CorporationName,
            },
        };
        tokens.push(Token::new(word, label));
    }

    tokens
}

pub fn normalizer() -> FakeNormalizer {
    IdentityNormalizer::new(
        address_tagger as fn(&str) -> Vec<Token<AddressLabel>>,
        name_tagger as fn(&str, ParserMode) -> Vec<Token<NameLabel>>,
    )
}

#[allow(dead_code)]
pub fn contact_groups() -> ColumnGroups {
    ColumnGroups::new()
        .address(["street", "city", "state", "zip"])
        .contact(["first", "last"])
        .company(["company"])
        .phone(["phone"])
}

#[allow(dead_code)]
pub fn account_groups() -> ColumnGroups {
    ColumnGroups::new()
        .address(["street", "city", "state", "zip"])
        .company(["account_name"])
        .phone(["phone"])
}
