//! Record sources for the two public registries and the gateway seam they
//! retrieve through.

mod businesses;
mod gateway;
mod memory;
mod normalizer;
mod rentals;
mod soda;

pub use businesses::{BusinessLicense, BusinessRecordSource, LODGING_NAICS_CODES};
pub use gateway::{DatasetGateway, DatasetQuery, TransportError};
pub use memory::{FixtureError, InMemoryGateway};
pub use normalizer::{normalize_account_number, normalize_license_number, ACCOUNT_NUMBER_WIDTH};
pub use rentals::{LicenseStatus, RentalLicense, RentalRecordSource, UnitStatus};
pub use soda::SodaClient;

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed dataset payload: {0}")]
    Decoding(#[from] serde_json::Error),
}

/// Records returned by one fetch, plus whether the upstream cap cut them off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub truncated: bool,
    pub limit: usize,
}

impl<T> Fetched<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decodes a JSON array body, keeping at most `limit` records.
fn decode_capped<T: DeserializeOwned>(
    body: &str,
    limit: usize,
) -> Result<(Vec<T>, bool), FetchError> {
    let mut records: Vec<T> = serde_json::from_str(body.trim_start_matches('\u{feff}'))?;
    let truncated = records.len() > limit;
    records.truncate(limit);
    Ok((records, truncated))
}
