//! Airport model

use serde::{Deserialize, Serialize};

use crate::store::{Record, StoredEntity, fields};

/// An airport identified by its IATA code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub city_code: String,
}

impl Airport {
    #[must_use]
    pub fn new(code: String, name: String, country_code: String, city_code: String) -> Self {
        Self {
            code,
            name,
            country_code,
            city_code,
        }
    }
}

impl StoredEntity for Airport {
    const COLLECTION: &'static str = "AirportManaged";

    fn to_record(&self) -> Record {
        Record::new(&self.code)
            .with(fields::CODE, &self.code)
            .with(fields::NAME, &self.name)
            .with(fields::COUNTRY_CODE, &self.country_code)
            .with(fields::CITY_CODE, &self.city_code)
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            code: record.get_owned(fields::CODE)?,
            name: record.get_owned(fields::NAME)?,
            country_code: record.get_owned(fields::COUNTRY_CODE)?,
            city_code: record.get_owned(fields::CITY_CODE)?,
        })
    }
}
