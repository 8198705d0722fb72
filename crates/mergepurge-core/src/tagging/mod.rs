//! Tagger capabilities and their outputs
//!
//! The address and name taggers are external models. This module only
//! fixes the shape of what they hand back:
//! - `parse` yields one `(value, label)` token per input word
//! - `tag` folds adjacent tokens sharing a label into one component and
//!   refuses (with [`AmbiguousLabel`]) when a label shows up again later
//!
//! Closures implement both traits so tests can plug in deterministic fakes.

mod labels;
pub mod resolver;

pub use labels::{AddressLabel, ComponentLabel, NameLabel, ParserMode};
pub use resolver::{resolve_address, resolve_name, Resolution};

use crate::error::AmbiguousLabel;

/// One tagged word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<L> {
    pub value: String,
    pub label: L,
}

impl<L> Token<L> {
    pub fn new(value: impl Into<String>, label: L) -> Self {
        Self {
            value: value.into(),
            label,
        }
    }
}

/// Insertion-ordered label -> value mapping
///
/// Keeps the position where a label first appeared even when its value is
/// later replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap<L> {
    entries: Vec<(L, String)>,
}

impl<L> Default for LabelMap<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: ComponentLabel> LabelMap<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &L) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &L) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Insert or replace, returning the previous value
    pub fn insert(&mut self, label: L, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((label, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &str)> {
        self.entries.iter().map(|(l, v)| (l, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fold per-word tokens into components.
///
/// Adjacent tokens with the same label are joined with a space. A label that
/// reappears after a different label is an ambiguity.
pub fn merge_tokens<L: ComponentLabel>(
    tokens: Vec<Token<L>>,
) -> Result<LabelMap<L>, AmbiguousLabel<L>> {
    let mut map = LabelMap::new();
    let mut last: Option<&L> = None;
    let mut repeated = None;

    for token in &tokens {
        if last == Some(&token.label) {
            if let Some((_, value)) = map.entries.last_mut() {
                value.push(' ');
                value.push_str(&token.value);
            }
            continue;
        }
        if map.contains(&token.label) {
            repeated = Some(token.label.clone());
            break;
        }
        map.insert(token.label.clone(), token.value.clone());
        last = Some(&token.label);
    }

    match repeated {
        Some(label) => Err(AmbiguousLabel { label, tokens }),
        None => Ok(map),
    }
}

/// Postal address tagger
pub trait AddressTagger: Sync {
    /// Label every word of `text`
    fn parse(&self, text: &str) -> Vec<Token<AddressLabel>>;

    /// Label and fold into single-valued components
    fn tag(&self, text: &str) -> Result<LabelMap<AddressLabel>, AmbiguousLabel<AddressLabel>> {
        merge_tokens(self.parse(text))
    }
}

impl<F> AddressTagger for F
where
    F: Fn(&str) -> Vec<Token<AddressLabel>> + Sync,
{
    fn parse(&self, text: &str) -> Vec<Token<AddressLabel>> {
        self(text)
    }
}

/// Person and organization name tagger
pub trait NameTagger: Sync {
    /// Label every word of `text` using the model selected by `mode`
    fn parse(&self, text: &str, mode: ParserMode) -> Vec<Token<NameLabel>>;

    /// Label and fold into single-valued components
    fn tag(
        &self,
        text: &str,
        mode: ParserMode,
    ) -> Result<LabelMap<NameLabel>, AmbiguousLabel<NameLabel>> {
        merge_tokens(self.parse(text, mode))
    }
}

impl<F> NameTagger for F
where
    F: Fn(&str, ParserMode) -> Vec<Token<NameLabel>> + Sync,
{
    fn parse(&self, text: &str, mode: ParserMode) -> Vec<Token<NameLabel>> {
        self(text, mode)
    }
}
