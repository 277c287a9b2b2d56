//! Generic stored records, exact-match predicates and the per-entity mapping trait

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field names used by every stored collection.
pub mod fields {
    pub const CODE: &str = "code";
    pub const NAME: &str = "name";
    pub const LOCALIZED_NAME: &str = "localized_name";
    pub const COUNTRY_CODE: &str = "country_code";
    pub const CITY_CODE: &str = "city_code";
}

/// A persisted row: primary key plus string fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    key: String,
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record identified by `key`
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Primary key the store upserts on
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set a field value
    pub fn set<V: Into<String>>(&mut self, field: &str, value: V) {
        self.fields.insert(field.to_string(), value.into());
    }

    #[must_use]
    pub fn with<V: Into<String>>(mut self, field: &str, value: V) -> Self {
        self.set(field, value);
        self
    }

    /// Set the field only when a value is present
    #[must_use]
    pub fn with_optional(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.set(field, value);
        }
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Owned copy of a field, for building domain models
    #[must_use]
    pub fn get_owned(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// True when every predicate entry equals the stored field exactly
    #[must_use]
    pub fn matches(&self, predicate: &Predicate) -> bool {
        predicate
            .iter()
            .all(|(field, expected)| self.get(field) == Some(expected))
    }
}

/// Exact-match filter from field name to required value.
///
/// An empty predicate matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: BTreeMap<String, String>,
}

impl Predicate {
    /// Matches all records
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches records whose `field` equals `value`
    pub fn field_equals<V: Into<String>>(field: &str, value: V) -> Self {
        Self::all().and(field, value)
    }

    /// Add another exact-match condition
    #[must_use]
    pub fn and<V: Into<String>>(mut self, field: &str, value: V) -> Self {
        self.conditions.insert(field.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

/// Compile-time mapping between a domain model and its stored record
pub trait StoredEntity: Sized {
    /// Fixed collection name in the store
    const COLLECTION: &'static str;

    fn to_record(&self) -> Record;

    /// Rebuild the model, or `None` if a required field is missing
    fn from_record(record: &Record) -> Option<Self>;
}
