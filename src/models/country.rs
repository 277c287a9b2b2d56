//! Country model

use serde::{Deserialize, Serialize};

use crate::store::{Record, StoredEntity, fields};

/// A country identified by its IATA code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Country {
    /// IATA code, e.g. "RU"
    pub code: String,
    /// Name as published by the data service
    pub name: String,
    /// Localized name, when the payload carried one
    pub localized_name: Option<String>,
}

impl Country {
    #[must_use]
    pub fn new(code: String, name: String) -> Self {
        Self {
            code,
            name,
            localized_name: None,
        }
    }

    #[must_use]
    pub fn with_localized_name(mut self, localized_name: String) -> Self {
        self.localized_name = Some(localized_name);
        self
    }
}

impl StoredEntity for Country {
    const COLLECTION: &'static str = "CountryManaged";

    fn to_record(&self) -> Record {
        Record::new(&self.code)
            .with(fields::CODE, &self.code)
            .with(fields::NAME, &self.name)
            .with_optional(fields::LOCALIZED_NAME, self.localized_name.as_deref())
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            code: record.get_owned(fields::CODE)?,
            name: record.get_owned(fields::NAME)?,
            localized_name: record.get_owned(fields::LOCALIZED_NAME),
        })
    }
}
