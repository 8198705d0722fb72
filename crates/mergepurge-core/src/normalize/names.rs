//! Person and company name normalization

use crate::dataset::RawRecord;
use crate::error::AmbiguousLabel;
use crate::tagging::{resolve_name, LabelMap, NameLabel, NameTagger, ParserMode};

use super::text::{clean_free_text, concat_columns, non_empty};
use super::Strictness;

/// Name parts useful for comparing contacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `first last`, only when both are known
    pub full_name: Option<String>,
}

/// Company name components that are specific enough to match on.
///
/// Given names and surnames stay because many businesses are named after
/// their owners (doctors, lawyers). Legal suffixes like "LLC" go.
const COMPANY_KEEPERS: [NameLabel; 3] = [
    NameLabel::CorporationName,
    NameLabel::Surname,
    NameLabel::GivenName,
];

/// Tag name text, recovering from repeated labels in lenient mode.
fn tag_name<T>(
    tagger: &T,
    text: &str,
    mode: ParserMode,
    strictness: Strictness,
) -> Result<LabelMap<NameLabel>, AmbiguousLabel<NameLabel>>
where
    T: NameTagger + ?Sized,
{
    if text.is_empty() {
        return Ok(LabelMap::new());
    }

    match tagger.tag(text, mode) {
        Ok(map) => Ok(map),
        Err(err) if strictness == Strictness::Strict => Err(err),
        Err(err) => {
            let resolution = resolve_name(&err.tokens);
            tracing::debug!(
                label = %err.label,
                conflicts = ?resolution.conflicting_values,
                ?mode,
                "name tagger repeated a label, keeping last values"
            );
            Ok(resolution.mapping)
        }
    }
}

fn name_text<R, S>(record: &R, columns: &[S]) -> String
where
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    clean_free_text(&concat_columns(record, columns, false))
}

/// Parse a person's name from the given columns
pub fn normalize_person<T, R, S>(
    tagger: &T,
    record: &R,
    columns: &[S],
    strictness: Strictness,
) -> Result<PersonName, AmbiguousLabel<NameLabel>>
where
    T: NameTagger + ?Sized,
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    let parsed = tag_name(tagger, &name_text(record, columns), ParserMode::Person, strictness)?;

    let first_name = parsed.get(&NameLabel::GivenName).and_then(non_empty);
    let last_name = parsed.get(&NameLabel::Surname).and_then(non_empty);
    let full_name = match (&first_name, &last_name) {
        (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
        _ => None,
    };

    Ok(PersonName {
        title: parsed.get(&NameLabel::PrefixOther).and_then(non_empty),
        first_name,
        last_name,
        full_name,
    })
}

/// Rebuild a matchable company name from the given columns.
///
/// Uses the generic model rather than the company one; it copes better with
/// the mix of business and personal names found in account columns.
pub fn normalize_company<T, R, S>(
    tagger: &T,
    record: &R,
    columns: &[S],
    strictness: Strictness,
) -> Result<Option<String>, AmbiguousLabel<NameLabel>>
where
    T: NameTagger + ?Sized,
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    let parsed = tag_name(tagger, &name_text(record, columns), ParserMode::Generic, strictness)?;

    let rebuilt = parsed
        .iter()
        .filter(|(label, _)| COMPANY_KEEPERS.contains(*label))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(non_empty(&rebuilt))
}
