//! Label vocabularies emitted by the address and name taggers
//!
//! Both vocabularies use the component names of the CRF taggers they were
//! trained against, so a tagger adapter can map its string labels with
//! `From<&str>` and anything unrecognized lands in `Other`.

use std::fmt;
use std::hash::Hash;

/// Common bound for tagger labels
pub trait ComponentLabel: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T> ComponentLabel for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

macro_rules! label_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A label outside the known vocabulary
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                    $name::Other(s) => s,
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $(stringify!($variant) => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_vocabulary! {
    /// Components of a US postal address
    AddressLabel {
        AddressNumberPrefix,
        AddressNumber,
        AddressNumberSuffix,
        StreetNamePreModifier,
        StreetNamePreDirectional,
        StreetNamePreType,
        StreetName,
        StreetNamePostType,
        StreetNamePostDirectional,
        SubaddressType,
        SubaddressIdentifier,
        BuildingName,
        OccupancyType,
        OccupancyIdentifier,
        CornerOf,
        LandmarkName,
        PlaceName,
        StateName,
        ZipCode,
        USPSBoxType,
        USPSBoxID,
        USPSBoxGroupType,
        USPSBoxGroupID,
        IntersectionSeparator,
        Recipient,
        NotAddress,
    }
}

label_vocabulary! {
    /// Components of a person or organization name
    NameLabel {
        PrefixMarital,
        PrefixOther,
        GivenName,
        FirstInitial,
        MiddleName,
        MiddleInitial,
        Surname,
        LastInitial,
        SuffixGenerational,
        SuffixOther,
        Nickname,
        And,
        CorporationName,
        CorporationNameOrganization,
        CorporationLegalType,
        CorporationNamePossessiveOf,
        ShortForm,
        ProxyFor,
        AKA,
    }
}

/// Which name model the tagger should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserMode {
    /// Mixed person/organization model
    Generic,
    Person,
    Company,
}
