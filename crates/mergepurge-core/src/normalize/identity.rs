//! The normalized identity record and its dataset columns

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, RawRecord};
use crate::error::DatasetError;

use super::address::AddressParts;
use super::names::PersonName;
use super::phone::PhoneNumber;
use super::text::non_empty;

pub const COL_STREET_NUMBER: &str = "aa_streetnum";
pub const COL_STREET: &str = "aa_street";
pub const COL_CITY: &str = "aa_city";
pub const COL_STATE: &str = "aa_state";
pub const COL_ZIP: &str = "aa_zip";
pub const COL_FULL_ADDRESS: &str = "aa_fulladdy";
pub const COL_TITLE: &str = "aa_title";
pub const COL_FIRST_NAME: &str = "aa_firstname";
pub const COL_LAST_NAME: &str = "aa_lastname";
pub const COL_FULL_NAME: &str = "aa_fullname";
pub const COL_COMPANY: &str = "aa_company";
pub const COL_PHONE: &str = "aa_phone";
pub const COL_PHONE_EXTENSION: &str = "aa_phone_ext";

/// Canonical, parser-derived view of one contact or account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedIdentity {
    pub street_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub full_address: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub phone_extension: Option<String>,
}

impl NormalizedIdentity {
    pub(crate) fn set_address(&mut self, parts: AddressParts) {
        self.street_number = parts.street_number;
        self.street = parts.street;
        self.city = parts.city;
        self.state = parts.state;
        self.zip = parts.zip;
        self.full_address = parts.full_address;
    }

    pub(crate) fn set_person(&mut self, name: PersonName) {
        self.title = name.title;
        self.first_name = name.first_name;
        self.last_name = name.last_name;
        self.full_name = name.full_name;
    }

    pub(crate) fn set_phone(&mut self, phone: PhoneNumber) {
        self.phone = phone.number;
        self.phone_extension = phone.extension;
    }

    /// Read an identity back from previously appended `aa_*` columns
    pub fn from_record<R: RawRecord + ?Sized>(record: &R) -> Self {
        let read = |column: &str| record.get(column).and_then(non_empty);
        Self {
            street_number: read(COL_STREET_NUMBER),
            street: read(COL_STREET),
            city: read(COL_CITY),
            state: read(COL_STATE),
            zip: read(COL_ZIP),
            full_address: read(COL_FULL_ADDRESS),
            title: read(COL_TITLE),
            first_name: read(COL_FIRST_NAME),
            last_name: read(COL_LAST_NAME),
            full_name: read(COL_FULL_NAME),
            company_name: read(COL_COMPANY),
            phone: read(COL_PHONE),
            phone_extension: read(COL_PHONE_EXTENSION),
        }
    }

    /// Read identities from every row of a dataset with `aa_*` columns
    pub fn from_dataset(dataset: &Dataset) -> Vec<Self> {
        dataset.rows().map(|row| Self::from_record(&row)).collect()
    }
}

/// Which identity column groups were computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputedGroups {
    pub address: bool,
    pub contact: bool,
    pub company: bool,
    pub phone: bool,
}

/// Append the identity columns for the computed groups to a dataset
pub fn augment_dataset(
    dataset: &mut Dataset,
    identities: &[NormalizedIdentity],
    groups: ComputedGroups,
) -> Result<(), DatasetError> {
    let column = |field: fn(&NormalizedIdentity) -> Option<String>| -> Vec<Option<String>> {
        identities.iter().map(field).collect()
    };

    let mut columns: Vec<(&str, Vec<Option<String>>)> = Vec::new();
    if groups.address {
        columns.push((COL_STREET_NUMBER, column(|i| i.street_number.clone())));
        columns.push((COL_STREET, column(|i| i.street.clone())));
        columns.push((COL_CITY, column(|i| i.city.clone())));
        columns.push((COL_STATE, column(|i| i.state.clone())));
        columns.push((COL_ZIP, column(|i| i.zip.clone())));
        columns.push((COL_FULL_ADDRESS, column(|i| i.full_address.clone())));
    }
    if groups.contact {
        columns.push((COL_TITLE, column(|i| i.title.clone())));
        columns.push((COL_FIRST_NAME, column(|i| i.first_name.clone())));
        columns.push((COL_LAST_NAME, column(|i| i.last_name.clone())));
        columns.push((COL_FULL_NAME, column(|i| i.full_name.clone())));
    }
    if groups.company {
        columns.push((COL_COMPANY, column(|i| i.company_name.clone())));
    }
    if groups.phone {
        columns.push((COL_PHONE, column(|i| i.phone.clone())));
        columns.push((COL_PHONE_EXTENSION, column(|i| i.phone_extension.clone())));
    }

    for (name, values) in columns {
        dataset.set_column(name, values)?;
    }
    Ok(())
}
