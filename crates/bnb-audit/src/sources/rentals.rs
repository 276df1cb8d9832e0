use super::gateway::{DatasetGateway, DatasetQuery};
use super::{decode_capped, FetchError, Fetched};
use crate::config::DatasetConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const LEGACY_IN_SEATTLE: &str = "Legacy In Seattle";

/// Pushed-down form of [`RentalLicense::is_reportable`].
const REPORTABLE_WHERE: &str = "unitstatus='Active' \
AND (licensestatus='Active' OR licensestatus='Expired') \
AND (legacystatus IS NULL OR legacystatus != 'Legacy In Seattle')";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitStatus {
    Active,
    Inactive,
    Other(String),
}

impl UnitStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for UnitStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for UnitStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            _ => Self::Other(raw),
        }
    }
}

impl From<UnitStatus> for String {
    fn from(status: UnitStatus) -> Self {
        status.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseStatus {
    Active,
    Expired,
    Other(String),
}

impl LicenseStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for LicenseStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for LicenseStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "Active" => Self::Active,
            "Expired" => Self::Expired,
            _ => Self::Other(raw),
        }
    }
}

impl From<LicenseStatus> for String {
    fn from(status: LicenseStatus) -> Self {
        status.label().to_string()
    }
}

/// One short-term-rental unit license. Socrata omits null columns, so every
/// field falls back to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalLicense {
    #[serde(rename = "seattlebusinesslicensenumber", default)]
    pub business_license_number: String,
    #[serde(rename = "licenseid", default)]
    pub license_id: String,
    #[serde(rename = "unitstatus", default)]
    pub unit_status: UnitStatus,
    #[serde(rename = "licensestatus", default)]
    pub license_status: LicenseStatus,
    #[serde(rename = "addressline", default)]
    pub address_line: String,
    #[serde(rename = "propertytype", default)]
    pub property_type: String,
    #[serde(rename = "bedroomcount", default)]
    pub bedroom_count: String,
    #[serde(rename = "legacystatus", default)]
    pub legacy_status: String,
    #[serde(rename = "primaryresidence", default)]
    pub primary_residence: String,
}

impl RentalLicense {
    /// Active unit holding an active or expired license that is not a
    /// grandfathered "Legacy In Seattle" registration.
    pub fn is_reportable(&self) -> bool {
        self.unit_status == UnitStatus::Active
            && matches!(
                self.license_status,
                LicenseStatus::Active | LicenseStatus::Expired
            )
            && self.legacy_status.trim() != LEGACY_IN_SEATTLE
    }
}

/// Short-term-rental licenses, filtered and ordered by business license number.
pub struct RentalRecordSource<'g, G> {
    gateway: &'g G,
    endpoint: String,
    limit: usize,
}

impl<'g, G: DatasetGateway> RentalRecordSource<'g, G> {
    pub fn new(gateway: &'g G, config: &DatasetConfig) -> Self {
        Self {
            gateway,
            endpoint: config.rental_endpoint.clone(),
            limit: config.result_limit,
        }
    }

    pub fn query(&self) -> DatasetQuery {
        DatasetQuery::new(self.limit)
            .filter(REPORTABLE_WHERE)
            .order_asc("seattlebusinesslicensenumber")
    }

    /// Each call re-queries the registry.
    pub async fn fetch(&self) -> Result<Fetched<RentalLicense>, FetchError> {
        info!(endpoint = %self.endpoint, limit = self.limit, "fetching rental licenses");

        let body = self.gateway.fetch(&self.endpoint, &self.query()).await?;
        let (records, truncated) = decode_capped::<RentalLicense>(&body, self.limit)?;
        let retrieved = records.len();
        let records: Vec<RentalLicense> = records
            .into_iter()
            .filter(RentalLicense::is_reportable)
            .collect();

        if truncated {
            warn!(
                limit = self.limit,
                "rental license result hit the row cap; later licenses are missing"
            );
        }
        info!(retrieved, kept = records.len(), "rental licenses fetched");

        Ok(Fetched {
            records,
            truncated,
            limit: self.limit,
        })
    }
}
