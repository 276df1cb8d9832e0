use serde::Serialize;

/// Match statistics for one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub rentals: usize,
    pub businesses: usize,
    pub rows: usize,
    pub matched_rentals: usize,
    pub unmatched_rentals: usize,
    /// Rentals whose license number is held by more than one business record.
    pub rentals_with_multiple_businesses: usize,
}

impl ReconciliationSummary {
    pub fn match_rate(&self) -> f64 {
        if self.rentals == 0 {
            0.0
        } else {
            self.matched_rentals as f64 / self.rentals as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_rate_handles_empty_input() {
        assert_eq!(ReconciliationSummary::default().match_rate(), 0.0);

        let summary = ReconciliationSummary {
            rentals: 4,
            matched_rentals: 1,
            ..ReconciliationSummary::default()
        };
        assert!((summary.match_rate() - 0.25).abs() < f64::EPSILON);
    }
}
