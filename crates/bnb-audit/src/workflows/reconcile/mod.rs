//! Identifier-normalized inner join of rental licenses against business
//! licenses.

mod summary;

pub use summary::ReconciliationSummary;

use super::report::CombinedReportRow;
use crate::sources::{normalize_license_number, BusinessLicense, RentalLicense};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Joined rows plus their match statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub rows: Vec<CombinedReportRow>,
    pub summary: ReconciliationSummary,
}

pub struct Reconciler;

impl Reconciler {
    /// Inner join on `rental.business_license_number == business.city_account_number`.
    ///
    /// Businesses must already carry normalized account numbers, as returned by
    /// `BusinessRecordSource`. Every matching pair yields one row. Output is
    /// sorted by business license number, rental license id, then business
    /// legal name, so it does not depend on input order.
    pub fn join(
        rentals: &[RentalLicense],
        businesses: &[BusinessLicense],
    ) -> Vec<CombinedReportRow> {
        Self::reconcile(rentals, businesses).rows
    }

    pub fn reconcile(rentals: &[RentalLicense], businesses: &[BusinessLicense]) -> Reconciliation {
        let index = index_by_account(businesses);

        let mut rows = Vec::new();
        let mut summary = ReconciliationSummary {
            rentals: rentals.len(),
            businesses: businesses.len(),
            ..ReconciliationSummary::default()
        };

        for rental in rentals {
            let key = normalize_license_number(&rental.business_license_number);
            let holders = match index.get(key) {
                Some(holders) => holders,
                None => {
                    summary.unmatched_rentals += 1;
                    continue;
                }
            };

            summary.matched_rentals += 1;
            if holders.len() > 1 {
                debug!(
                    license = key,
                    holders = holders.len(),
                    "rental license held by several business records"
                );
                summary.rentals_with_multiple_businesses += 1;
            }

            rows.extend(
                holders
                    .iter()
                    .map(|business| CombinedReportRow::from_pair(rental, business)),
            );
        }

        rows.sort_by(compare_rows);
        summary.rows = rows.len();

        Reconciliation { rows, summary }
    }
}

fn index_by_account(businesses: &[BusinessLicense]) -> HashMap<&str, Vec<&BusinessLicense>> {
    let mut index: HashMap<&str, Vec<&BusinessLicense>> =
        HashMap::with_capacity(businesses.len());
    for business in businesses {
        let key = normalize_license_number(&business.city_account_number);
        if key.is_empty() {
            continue;
        }
        index.entry(key).or_default().push(business);
    }
    index
}

/// Numeric order for canonical decimal strings; falls back to lexical order
/// between equal-length keys.
fn compare_license_numbers(left: &str, right: &str) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn compare_rows(left: &CombinedReportRow, right: &CombinedReportRow) -> Ordering {
    compare_license_numbers(&left.business_license, &right.business_license)
        .then_with(|| left.bnb_license.cmp(&right.bnb_license))
        .then_with(|| left.business_name.cmp(&right.business_name))
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{LicenseStatus, UnitStatus};

    fn rental(license_number: &str, license_id: &str) -> RentalLicense {
        RentalLicense {
            business_license_number: license_number.to_string(),
            license_id: license_id.to_string(),
            unit_status: UnitStatus::Active,
            license_status: LicenseStatus::Active,
            legacy_status: "Current".to_string(),
            ..RentalLicense::default()
        }
    }

    fn business(account: &str, name: &str) -> BusinessLicense {
        BusinessLicense {
            city_account_number: account.to_string(),
            business_legal_name: name.to_string(),
            naics_code: "721191".to_string(),
            ..BusinessLicense::default()
        }
    }

    #[test]
    fn matching_pair_yields_one_row_with_both_sides() {
        let rows = Reconciler::join(&[rental("71766", "L1")], &[business("71766", "Acme BnB")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].business_license, "71766");
        assert_eq!(rows[0].bnb_license, "L1");
        assert_eq!(rows[0].business_name, "Acme BnB");
    }

    #[test]
    fn unmatched_rental_yields_nothing() {
        let result =
            Reconciler::reconcile(&[rental("71766", "L1")], &[business("80000", "Other")]);
        assert!(result.rows.is_empty());
        assert_eq!(result.summary.unmatched_rentals, 1);
        assert_eq!(result.summary.matched_rentals, 0);
    }

    #[test]
    fn one_rental_matching_two_businesses_yields_two_rows() {
        let result = Reconciler::reconcile(
            &[rental("100", "L1")],
            &[business("100", "Acme BnB"), business("100", "Acme Holdings")],
        );
        assert_eq!(result.rows.len(), 2);
        assert_ne!(result.rows[0], result.rows[1]);
        assert_eq!(result.summary.rentals_with_multiple_businesses, 1);
        assert_eq!(result.summary.rows, 2);
    }

    #[test]
    fn one_business_matching_two_rentals_yields_two_rows() {
        let rows = Reconciler::join(
            &[rental("100", "L2"), rental("100", "L1")],
            &[business("100", "Acme BnB")],
        );
        let ids: Vec<&str> = rows.iter().map(|row| row.bnb_license.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L2"]);
    }

    #[test]
    fn empty_identifiers_never_match() {
        let rows = Reconciler::join(&[rental("", "L1")], &[business("", "Blank")]);
        assert!(rows.is_empty());
    }

    #[test]
    fn output_is_ordered_numerically_regardless_of_input_order() {
        let rentals = [rental("900", "A"), rental("1000", "B"), rental("95", "C")];
        let businesses = [business("1000", "X"), business("95", "Y"), business("900", "Z")];
        let rows = Reconciler::join(&rentals, &businesses);
        let keys: Vec<&str> = rows.iter().map(|row| row.business_license.as_str()).collect();
        assert_eq!(keys, vec!["95", "900", "1000"]);
    }

    #[test]
    fn rows_for_one_rental_are_ordered_by_business_name() {
        let mut holdings = business("100", "Acme Holdings");
        holdings.ubi = "600000001".to_string();
        let mut bnb = business("100", "Acme BnB");
        bnb.ubi = "600000002".to_string();

        let rows = Reconciler::join(&[rental("100", "L1")], &[holdings, bnb]);
        let names: Vec<&str> = rows.iter().map(|row| row.business_name.as_str()).collect();
        assert_eq!(names, vec!["Acme BnB", "Acme Holdings"]);
    }

    #[test]
    fn join_is_repeatable() {
        let rentals = [rental("100", "L1"), rental("200", "L2"), rental("300", "L3")];
        let businesses = [business("200", "B"), business("100", "A"), business("100", "A2")];
        let first = Reconciler::join(&rentals, &businesses);
        let second = Reconciler::join(&rentals, &businesses);
        assert_eq!(first, second);
    }
}
