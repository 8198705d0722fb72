//! Best-effort recovery from repeated tagger labels
//!
//! Only used in lenient mode, after a tagger has refused to fold its tokens.
//! Neither policy can fail: ambiguity becomes data.

use std::collections::BTreeSet;

use super::{AddressLabel, ComponentLabel, LabelMap, Token};

/// Outcome of resolving an ambiguous tag sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<L> {
    /// First label seen twice, if any
    pub problem_label: Option<L>,
    /// Every value that competed for a repeated label
    pub conflicting_values: BTreeSet<String>,
    /// One value per label
    pub mapping: LabelMap<L>,
}

/// Address fields worth keeping from an ambiguous parse
const ADDRESS_KEEPERS: [AddressLabel; 3] = [
    AddressLabel::AddressNumber,
    AddressLabel::StreetName,
    AddressLabel::StateName,
];

/// Resolve an ambiguous address parse.
///
/// Walks the tokens from the end and keeps the first value seen for the
/// house number, street name and state, so the last occurrence in reading
/// order wins. Every other label is dropped.
pub fn resolve_address(tokens: &[Token<AddressLabel>]) -> Resolution<AddressLabel> {
    let mut resolution = scan_conflicts(tokens);

    let mut mapping = LabelMap::new();
    for token in tokens.iter().rev() {
        if ADDRESS_KEEPERS.contains(&token.label) && !mapping.contains(&token.label) {
            mapping.insert(token.label.clone(), token.value.clone());
        }
    }
    resolution.mapping = mapping;
    resolution
}

/// Resolve an ambiguous name parse.
///
/// The mapping takes the last value seen per label in reading order; which of
/// the conflicting values is actually right is left to the caller.
pub fn resolve_name<L: ComponentLabel>(tokens: &[Token<L>]) -> Resolution<L> {
    scan_conflicts(tokens)
}

fn scan_conflicts<L: ComponentLabel>(tokens: &[Token<L>]) -> Resolution<L> {
    let mut mapping = LabelMap::new();
    let mut problem_label = None;
    let mut conflicting_values = BTreeSet::new();

    for token in tokens {
        if let Some(previous) = mapping.insert(token.label.clone(), token.value.clone()) {
            if problem_label.is_none() {
                problem_label = Some(token.label.clone());
            }
            conflicting_values.insert(previous);
            conflicting_values.insert(token.value.clone());
        }
    }

    Resolution {
        problem_label,
        conflicting_values,
        mapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::NameLabel;

    fn tokens<L: From<&'static str>>(pairs: &[(&'static str, &'static str)]) -> Vec<Token<L>> {
        pairs
            .iter()
            .map(|(v, l)| Token::new(*v, L::from(*l)))
            .collect()
    }

    #[test]
    fn test_address_last_occurrence_wins() {
        let parsed: Vec<Token<AddressLabel>> = tokens(&[
            ("12", "AddressNumber"),
            ("Oak", "StreetName"),
            ("CA", "StateName"),
            ("34", "AddressNumber"),
            ("Pine", "StreetName"),
            ("NV", "StateName"),
            ("89501", "ZipCode"),
        ]);

        let resolution = resolve_address(&parsed);

        assert_eq!(resolution.mapping.get(&AddressLabel::AddressNumber), Some("34"));
        assert_eq!(resolution.mapping.get(&AddressLabel::StreetName), Some("Pine"));
        assert_eq!(resolution.mapping.get(&AddressLabel::StateName), Some("NV"));
        assert!(!resolution.mapping.contains(&AddressLabel::ZipCode));
        assert_eq!(resolution.problem_label, Some(AddressLabel::AddressNumber));
    }

    #[test]
    fn test_name_keeps_last_value_and_reports_conflicts() {
        let parsed: Vec<Token<NameLabel>> = tokens(&[
            ("Mary", "GivenName"),
            ("Smith", "Surname"),
            ("Jane", "GivenName"),
        ]);

        let resolution = resolve_name(&parsed);

        assert_eq!(resolution.problem_label, Some(NameLabel::GivenName));
        assert_eq!(resolution.mapping.get(&NameLabel::GivenName), Some("Jane"));
        assert_eq!(resolution.mapping.get(&NameLabel::Surname), Some("Smith"));
        let conflicts: Vec<_> = resolution.conflicting_values.iter().cloned().collect();
        assert_eq!(conflicts, vec!["Jane".to_string(), "Mary".to_string()]);
    }

    #[test]
    fn test_unambiguous_sequence_has_no_problem_label() {
        let parsed: Vec<Token<NameLabel>> = tokens(&[("Bo", "GivenName"), ("Li", "Surname")]);
        let resolution = resolve_name(&parsed);
        assert!(resolution.problem_label.is_none());
        assert!(resolution.conflicting_values.is_empty());
    }
}
