//! Identity normalization
//!
//! Turns dirty contact/account columns into a [`NormalizedIdentity`]:
//! - address parts via the address tagger, with state fallback
//! - person name parts and a matchable company name via the name tagger
//! - a 10 digit phone number and extension
//!
//! Every irregularity other than a repeated tagger label in strict mode
//! degrades to an absent field.

mod address;
mod identity;
mod names;
mod phone;
mod states;
mod text;

pub use address::{address_text, normalize_address, AddressParts};
pub use identity::{
    augment_dataset, ComputedGroups, NormalizedIdentity, COL_CITY, COL_COMPANY,
    COL_FIRST_NAME, COL_FULL_ADDRESS, COL_FULL_NAME, COL_LAST_NAME, COL_PHONE,
    COL_PHONE_EXTENSION, COL_STATE, COL_STREET, COL_STREET_NUMBER, COL_TITLE, COL_ZIP,
};
pub use names::{normalize_company, normalize_person, PersonName};
pub use phone::{clean_us_phone, normalize_phone, PhoneNumber};
pub use states::{fall_back_empty_state, valid_state, STATES};
pub use text::comparison_key;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::NormalizationConfig;
use crate::dataset::{Dataset, RawRecord};
use crate::error::Result;
use crate::tagging::{AddressTagger, NameTagger};

/// How to treat a tagger that repeats a single-valued label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    /// Surface the ambiguity as an error
    Strict,
    /// Recover a best-effort value and carry on
    #[default]
    Lenient,
}

/// Source columns for each identity group, in concatenation order.
///
/// An empty list skips that group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroups {
    pub address: Vec<String>,
    pub contact: Vec<String>,
    pub company: Vec<String>,
    pub phone: Vec<String>,
}

impl ColumnGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.address = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn contact<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn company<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.company = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn phone<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phone = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Which groups will be computed
    pub fn computed(&self) -> ComputedGroups {
        ComputedGroups {
            address: !self.address.is_empty(),
            contact: !self.contact.is_empty(),
            company: !self.company.is_empty(),
            phone: !self.phone.is_empty(),
        }
    }
}

/// Builds [`NormalizedIdentity`] records with injected taggers
#[derive(Debug, Clone)]
pub struct IdentityNormalizer<A, N> {
    address_tagger: A,
    name_tagger: N,
    config: NormalizationConfig,
}

impl<A: AddressTagger, N: NameTagger> IdentityNormalizer<A, N> {
    pub fn new(address_tagger: A, name_tagger: N) -> Self {
        Self {
            address_tagger,
            name_tagger,
            config: NormalizationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NormalizationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn normalize_address<R, S>(
        &self,
        record: &R,
        columns: &[S],
        strictness: Strictness,
    ) -> Result<AddressParts>
    where
        R: RawRecord + ?Sized,
        S: AsRef<str>,
    {
        Ok(normalize_address(&self.address_tagger, record, columns, strictness)?)
    }

    pub fn normalize_person<R, S>(
        &self,
        record: &R,
        columns: &[S],
        strictness: Strictness,
    ) -> Result<PersonName>
    where
        R: RawRecord + ?Sized,
        S: AsRef<str>,
    {
        Ok(normalize_person(&self.name_tagger, record, columns, strictness)?)
    }

    pub fn normalize_company<R, S>(
        &self,
        record: &R,
        columns: &[S],
        strictness: Strictness,
    ) -> Result<Option<String>>
    where
        R: RawRecord + ?Sized,
        S: AsRef<str>,
    {
        Ok(normalize_company(&self.name_tagger, record, columns, strictness)?)
    }

    /// Normalize one record; groups without columns stay absent
    pub fn normalize_record<R>(
        &self,
        record: &R,
        groups: &ColumnGroups,
        strictness: Strictness,
    ) -> Result<NormalizedIdentity>
    where
        R: RawRecord + ?Sized,
    {
        let mut identity = NormalizedIdentity::default();

        if !groups.address.is_empty() {
            identity.set_address(self.normalize_address(record, &groups.address, strictness)?);
        }
        if !groups.contact.is_empty() {
            identity.set_person(self.normalize_person(record, &groups.contact, strictness)?);
        }
        if !groups.company.is_empty() {
            identity.company_name = self.normalize_company(record, &groups.company, strictness)?;
        }
        if !groups.phone.is_empty() {
            identity.set_phone(normalize_phone(
                record,
                &groups.phone,
                self.config.phone_extension,
            ));
        }

        Ok(identity)
    }

    fn normalize_lenient<R: RawRecord + ?Sized>(
        &self,
        record: &R,
        groups: &ColumnGroups,
    ) -> NormalizedIdentity {
        match self.normalize_record(record, groups, Strictness::Lenient) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("record left unnormalized: {}", e);
                NormalizedIdentity::default()
            }
        }
    }

    /// Normalize every row of a dataset, in row order, in lenient mode
    pub fn build_identities(
        &self,
        dataset: &Dataset,
        groups: &ColumnGroups,
    ) -> Vec<NormalizedIdentity> {
        #[cfg(feature = "parallel")]
        let identities: Vec<NormalizedIdentity> = (0..dataset.len())
            .into_par_iter()
            .filter_map(|i| dataset.row(i))
            .map(|row| self.normalize_lenient(&row, groups))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let identities: Vec<NormalizedIdentity> = dataset
            .rows()
            .map(|row| self.normalize_lenient(&row, groups))
            .collect();

        tracing::debug!(rows = identities.len(), "built normalized identities");
        identities
    }

    /// Normalize a dataset and append the `aa_*` identity columns to it
    pub fn build_matching_columns(
        &self,
        dataset: &mut Dataset,
        groups: &ColumnGroups,
    ) -> Result<Vec<NormalizedIdentity>> {
        let identities = self.build_identities(dataset, groups);
        augment_dataset(dataset, &identities, groups.computed())?;
        Ok(identities)
    }
}
