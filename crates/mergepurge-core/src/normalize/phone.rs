//! US phone number cleanup

use crate::dataset::RawRecord;

use super::text::concat_columns;

/// A cleaned phone number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumber {
    /// Exactly 10 digits
    pub number: Option<String>,
    /// Digits that followed "ext"
    pub extension: Option<String>,
}

/// Clean the concatenated phone columns of a record.
pub fn normalize_phone<R, S>(record: &R, columns: &[S], with_extension: bool) -> PhoneNumber
where
    R: RawRecord + ?Sized,
    S: AsRef<str>,
{
    clean_us_phone(&concat_columns(record, columns, false), with_extension)
}

/// Reduce free text to a 10 digit US number plus optional extension.
///
/// Non-ASCII characters are dropped first so stray numeric symbols from
/// other scripts cannot count as digits. Everything after the first "ext"
/// (any case) is the extension. Ten digits are kept as-is, eleven with a
/// leading `1` lose the country code, anything else is unusable and yields
/// neither a number nor an extension.
pub fn clean_us_phone(text: &str, with_extension: bool) -> PhoneNumber {
    let ascii: String = text.chars().filter(char::is_ascii).collect::<String>().to_lowercase();

    let (number_part, extension_part) = match ascii.split_once("ext") {
        Some((number, extension)) => (number, Some(extension)),
        None => (ascii.as_str(), None),
    };

    let mut number: String = number_part.chars().filter(char::is_ascii_digit).collect();
    match number.len() {
        10 => {}
        11 if number.starts_with('1') => {
            number.remove(0);
        }
        _ => return PhoneNumber::default(),
    }

    let extension = if with_extension {
        extension_part
            .map(|e| e.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|e| !e.is_empty())
    } else {
        None
    };

    PhoneNumber {
        number: Some(number),
        extension,
    }
}
