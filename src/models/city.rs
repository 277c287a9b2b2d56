//! City model

use serde::{Deserialize, Serialize};

use crate::store::{Record, StoredEntity, fields};

/// A city identified by its IATA code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct City {
    /// IATA code, e.g. "LED"
    pub code: String,
    pub name: String,
    pub localized_name: Option<String>,
    /// IATA code of the owning country. Not checked against stored countries.
    pub country_code: String,
}

impl City {
    #[must_use]
    pub fn new(code: String, name: String, country_code: String) -> Self {
        Self {
            code,
            name,
            localized_name: None,
            country_code,
        }
    }

    #[must_use]
    pub fn with_localized_name(mut self, localized_name: String) -> Self {
        self.localized_name = Some(localized_name);
        self
    }
}

impl StoredEntity for City {
    const COLLECTION: &'static str = "CityManaged";

    fn to_record(&self) -> Record {
        Record::new(&self.code)
            .with(fields::CODE, &self.code)
            .with(fields::NAME, &self.name)
            .with(fields::COUNTRY_CODE, &self.country_code)
            .with_optional(fields::LOCALIZED_NAME, self.localized_name.as_deref())
    }

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            code: record.get_owned(fields::CODE)?,
            name: record.get_owned(fields::NAME)?,
            localized_name: record.get_owned(fields::LOCALIZED_NAME),
            country_code: record.get_owned(fields::COUNTRY_CODE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip_with_localized_name() {
        let city = City::new("LED".to_string(), "Saint Petersburg".to_string(), "RU".to_string())
            .with_localized_name("Санкт-Петербург".to_string());

        let record = city.to_record();
        assert_eq!(record.get(fields::COUNTRY_CODE), Some("RU"));
        assert_eq!(City::from_record(&record), Some(city));
    }

    #[test]
    fn test_record_without_country_is_dropped() {
        let record = Record::new("LED")
            .with(fields::CODE, "LED")
            .with(fields::NAME, "Saint Petersburg");
        assert_eq!(City::from_record(&record), None);
    }
}
