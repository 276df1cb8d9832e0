use super::gateway::{DatasetGateway, DatasetQuery};
use super::normalizer::normalize_account_number;
use super::{decode_capped, FetchError, Fetched};
use crate::config::DatasetConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// NAICS codes for lodging trades a short-term rental operator files under:
/// residential lessors, bed-and-breakfast inns, other traveler accommodation,
/// rooming and boarding houses.
pub const LODGING_NAICS_CODES: [&str; 4] = ["531110", "721191", "721199", "721310"];

/// One business license (tax certificate) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLicense {
    #[serde(default)]
    pub city_account_number: String,
    #[serde(default)]
    pub business_legal_name: String,
    #[serde(default)]
    pub trade_name: String,
    #[serde(default)]
    pub ownership_type: String,
    #[serde(default)]
    pub naics_code: String,
    #[serde(default)]
    pub naics_description: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub business_phone: String,
    #[serde(default)]
    pub ubi: String,
}

impl BusinessLicense {
    pub fn is_lodging(&self) -> bool {
        LODGING_NAICS_CODES.contains(&self.naics_code.trim())
    }

    fn normalized(mut self) -> Self {
        self.city_account_number = normalize_account_number(&self.city_account_number);
        self
    }
}

/// Lodging-related business licenses with normalized account numbers.
pub struct BusinessRecordSource<'g, G> {
    gateway: &'g G,
    endpoint: String,
    limit: usize,
}

impl<'g, G: DatasetGateway> BusinessRecordSource<'g, G> {
    pub fn new(gateway: &'g G, config: &DatasetConfig) -> Self {
        Self {
            gateway,
            endpoint: config.business_endpoint.clone(),
            limit: config.result_limit,
        }
    }

    pub fn query(&self) -> DatasetQuery {
        let codes = LODGING_NAICS_CODES
            .iter()
            .map(|code| format!("'{code}'"))
            .collect::<Vec<_>>()
            .join(", ");

        DatasetQuery::new(self.limit)
            .filter(format!("naics_code IN ({codes})"))
            .order_asc("city_account_number")
    }

    /// Each call re-queries the registry. Every returned record has its
    /// `city_account_number` normalized.
    pub async fn fetch(&self) -> Result<Fetched<BusinessLicense>, FetchError> {
        info!(endpoint = %self.endpoint, limit = self.limit, "fetching business licenses");

        let body = self.gateway.fetch(&self.endpoint, &self.query()).await?;
        let (records, truncated) = decode_capped::<BusinessLicense>(&body, self.limit)?;
        let retrieved = records.len();
        let records: Vec<BusinessLicense> = records
            .into_iter()
            .filter(BusinessLicense::is_lodging)
            .map(BusinessLicense::normalized)
            .collect();

        if truncated {
            warn!(
                limit = self.limit,
                "business license result hit the row cap; later licenses are missing"
            );
        }
        info!(retrieved, kept = records.len(), "business licenses fetched");

        Ok(Fetched {
            records,
            truncated,
            limit: self.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn naics_codes_are_unique() {
        let unique: HashSet<_> = LODGING_NAICS_CODES.iter().collect();
        assert_eq!(unique.len(), LODGING_NAICS_CODES.len());
    }

    #[test]
    fn lodging_filter_matches_only_listed_codes() {
        let mut license = BusinessLicense {
            naics_code: "721191".to_string(),
            ..BusinessLicense::default()
        };
        assert!(license.is_lodging());

        license.naics_code = "722511".to_string();
        assert!(!license.is_lodging());

        license.naics_code = String::new();
        assert!(!license.is_lodging());
    }

    #[test]
    fn normalized_strips_padding_and_keeps_other_fields() {
        let license = BusinessLicense {
            city_account_number: "000071766".to_string(),
            business_legal_name: "Acme BnB LLC".to_string(),
            ..BusinessLicense::default()
        }
        .normalized();

        assert_eq!(license.city_account_number, "71766");
        assert_eq!(license.business_legal_name, "Acme BnB LLC");
    }
}
