//! Candidate lookup over the canonical dataset
//!
//! Exact keys (phone, address, full name) are tried first. Loose keys (zip,
//! last name, company) add near-duplicate candidates for fuzzy scoring. A
//! query with no exact key at all gets every canonical record.

use std::collections::{HashMap, HashSet};

use crate::config::BlockingConfig;
use crate::normalize::{comparison_key, NormalizedIdentity};

/// Exact comparison keys of one identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlockKey {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub full_name: Option<String>,
}

impl BlockKey {
    pub fn of(identity: &NormalizedIdentity) -> Self {
        Self {
            phone: identity.phone.as_deref().map(comparison_key).filter(|k| !k.is_empty()),
            address: address_key(identity),
            full_name: identity
                .full_name
                .as_deref()
                .map(comparison_key)
                .filter(|k| !k.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.address.is_none() && self.full_name.is_none()
    }

    /// True when any key present on both sides is equal
    pub fn shares_any(&self, other: &BlockKey) -> bool {
        fn same(a: &Option<String>, b: &Option<String>) -> bool {
            matches!((a, b), (Some(a), Some(b)) if a == b)
        }
        same(&self.phone, &other.phone)
            || same(&self.address, &other.address)
            || same(&self.full_name, &other.full_name)
    }
}

/// Folded "number street city state zip"; needs at least number and street
pub fn address_key(identity: &NormalizedIdentity) -> Option<String> {
    identity.street_number.as_ref()?;
    identity.street.as_ref()?;

    let parts = [
        &identity.street_number,
        &identity.street,
        &identity.city,
        &identity.state,
        &identity.zip,
    ];
    let joined = parts
        .iter()
        .filter_map(|p| p.as_deref())
        .collect::<Vec<_>>()
        .join(" ");
    let key = comparison_key(&joined);
    (!key.is_empty()).then_some(key)
}

fn loose_keys(identity: &NormalizedIdentity) -> [Option<String>; 3] {
    let fold = |v: &Option<String>| {
        v.as_deref()
            .map(comparison_key)
            .filter(|k| !k.is_empty())
    };
    [
        fold(&identity.zip),
        fold(&identity.last_name),
        fold(&identity.company_name),
    ]
}

type Buckets = HashMap<String, Vec<usize>>;

/// Read-only index over canonical identities
#[derive(Debug, Clone)]
pub struct BlockingIndex {
    len: usize,
    by_phone: Buckets,
    by_address: Buckets,
    by_full_name: Buckets,
    loose: Option<[Buckets; 3]>,
    keys: Vec<BlockKey>,
}

impl BlockingIndex {
    /// Index canonical identities with the default configuration
    pub fn build(canonical: &[NormalizedIdentity]) -> Self {
        Self::build_with_config(canonical, &BlockingConfig::default())
    }

    pub fn build_with_config(canonical: &[NormalizedIdentity], config: &BlockingConfig) -> Self {
        let mut by_phone = Buckets::new();
        let mut by_address = Buckets::new();
        let mut by_full_name = Buckets::new();
        let mut loose: Option<[Buckets; 3]> = config.loose_keys.then(Default::default);
        let mut keys = Vec::with_capacity(canonical.len());

        for (index, identity) in canonical.iter().enumerate() {
            let key = BlockKey::of(identity);
            for (bucket, value) in [
                (&mut by_phone, &key.phone),
                (&mut by_address, &key.address),
                (&mut by_full_name, &key.full_name),
            ] {
                if let Some(value) = value {
                    bucket.entry(value.clone()).or_default().push(index);
                }
            }
            if let Some(loose) = loose.as_mut() {
                for (bucket, value) in loose.iter_mut().zip(loose_keys(identity)) {
                    if let Some(value) = value {
                        bucket.entry(value).or_default().push(index);
                    }
                }
            }
            keys.push(key);
        }

        tracing::debug!(
            canonical = canonical.len(),
            phones = by_phone.len(),
            addresses = by_address.len(),
            names = by_full_name.len(),
            "built blocking index"
        );

        Self {
            len: canonical.len(),
            by_phone,
            by_address,
            by_full_name,
            loose,
            keys,
        }
    }

    /// Number of indexed canonical records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exact keys of an indexed canonical record
    pub fn key(&self, index: usize) -> Option<&BlockKey> {
        self.keys.get(index)
    }

    /// Canonical indices worth comparing against `identity`.
    ///
    /// Phone matches come first, then address, then full name, then loose
    /// keys; each index appears once, at its first discovery.
    pub fn candidates(&self, identity: &NormalizedIdentity) -> Vec<usize> {
        let key = BlockKey::of(identity);
        if key.is_empty() {
            return (0..self.len).collect();
        }

        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut collect = |bucket: &Buckets, value: &Option<String>| {
            if let Some(indices) = value.as_ref().and_then(|v| bucket.get(v)) {
                for &index in indices {
                    if seen.insert(index) {
                        found.push(index);
                    }
                }
            }
        };

        collect(&self.by_phone, &key.phone);
        collect(&self.by_address, &key.address);
        collect(&self.by_full_name, &key.full_name);
        if let Some(loose) = &self.loose {
            for (bucket, value) in loose.iter().zip(loose_keys(identity)) {
                collect(bucket, &value);
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(phone: Option<&str>, first: &str, last: &str, zip: Option<&str>) -> NormalizedIdentity {
        NormalizedIdentity {
            phone: phone.map(String::from),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            full_name: Some(format!("{} {}", first, last)),
            zip: zip.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_candidates_in_priority_order_without_duplicates() {
        let canonical = vec![
            identity(None, "Ann", "Lee", None),
            identity(Some("5035550101"), "Bob", "Ray", None),
            identity(Some("5035550101"), "Ann", "Lee", None),
        ];
        let index = BlockingIndex::build_with_config(
            &canonical,
            &BlockingConfig { loose_keys: false },
        );

        let query = identity(Some("5035550101"), "ANN", "lee", None);
        assert_eq!(index.candidates(&query), vec![1, 2, 0]);
    }

    #[test]
    fn test_no_exact_key_scans_everything() {
        let canonical = vec![
            identity(None, "Ann", "Lee", None),
            identity(None, "Bob", "Ray", None),
        ];
        let index = BlockingIndex::build(&canonical);

        let query = NormalizedIdentity {
            last_name: Some("Nobody".into()),
            ..Default::default()
        };
        assert_eq!(index.candidates(&query), vec![0, 1]);
    }

    #[test]
    fn test_unshared_exact_key_finds_nothing() {
        let canonical = vec![identity(Some("5035550101"), "Ann", "Lee", None)];
        let index = BlockingIndex::build_with_config(
            &canonical,
            &BlockingConfig { loose_keys: false },
        );

        let query = identity(Some("2125550199"), "Zed", "Zap", None);
        assert!(index.candidates(&query).is_empty());
    }

    #[test]
    fn test_loose_keys_add_near_duplicates() {
        let canonical = vec![
            identity(None, "Jon", "Smith", Some("94103")),
            identity(None, "Amy", "Wong", Some("94103")),
            identity(None, "Amy", "Wong", Some("10001")),
        ];
        let index = BlockingIndex::build(&canonical);

        let query = identity(Some("4155550134"), "John", "Smith", Some("94103"));
        assert_eq!(index.candidates(&query), vec![0, 1]);
    }

    #[test]
    fn test_address_key_needs_number_and_street() {
        let mut id = NormalizedIdentity {
            street: Some("Main".into()),
            city: Some("Reno".into()),
            ..Default::default()
        };
        assert_eq!(address_key(&id), None);

        id.street_number = Some("12".into());
        assert_eq!(address_key(&id).as_deref(), Some("12 main reno"));
    }

    #[test]
    fn test_empty_index() {
        let index = BlockingIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.candidates(&NormalizedIdentity::default()).is_empty());
    }
}
