use crate::sources::{BusinessLicense, RentalLicense};

/// Report header, in output order. Derived from [`ReportColumn`].
pub const REPORT_HEADERS: [&str; 18] = {
    let columns = ReportColumn::ordered();
    let mut headers = [""; 18];
    let mut idx = 0;
    while idx < columns.len() {
        headers[idx] = columns[idx].header();
        idx += 1;
    }
    headers
};

/// One report column. [`CombinedReportRow::value`] is the field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportColumn {
    BusinessLicense,
    BnbLicense,
    Ubi,
    UnitStatus,
    LicenseStatus,
    LegacyStatus,
    PrimaryResidence,
    UnitAddress,
    PropertyType,
    BedroomCount,
    BusinessName,
    TradeName,
    OwnershipType,
    BusinessAddress,
    BusinessCity,
    BusinessState,
    BusinessZip,
    BusinessPhone,
}

impl ReportColumn {
    pub const fn ordered() -> [Self; 18] {
        [
            Self::BusinessLicense,
            Self::BnbLicense,
            Self::Ubi,
            Self::UnitStatus,
            Self::LicenseStatus,
            Self::LegacyStatus,
            Self::PrimaryResidence,
            Self::UnitAddress,
            Self::PropertyType,
            Self::BedroomCount,
            Self::BusinessName,
            Self::TradeName,
            Self::OwnershipType,
            Self::BusinessAddress,
            Self::BusinessCity,
            Self::BusinessState,
            Self::BusinessZip,
            Self::BusinessPhone,
        ]
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::BusinessLicense => "Business_License",
            Self::BnbLicense => "BnB_License",
            Self::Ubi => "UBI",
            Self::UnitStatus => "Unit_Status",
            Self::LicenseStatus => "License_Status",
            Self::LegacyStatus => "Legacy_Status",
            Self::PrimaryResidence => "Primary_Residence",
            Self::UnitAddress => "Unit_Address",
            Self::PropertyType => "Property_Type",
            Self::BedroomCount => "Bedroom_Count",
            Self::BusinessName => "Business_Name",
            Self::TradeName => "Trade_Name",
            Self::OwnershipType => "Ownership_Type",
            Self::BusinessAddress => "Business_Address",
            Self::BusinessCity => "Business_City",
            Self::BusinessState => "Business_State",
            Self::BusinessZip => "Business_ZIP",
            Self::BusinessPhone => "Business_Phone",
        }
    }
}

/// A matched (rental, business) pair flattened for the report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CombinedReportRow {
    pub business_license: String,
    pub bnb_license: String,
    pub ubi: String,
    pub unit_status: String,
    pub license_status: String,
    pub legacy_status: String,
    pub primary_residence: String,
    pub unit_address: String,
    pub property_type: String,
    pub bedroom_count: String,
    pub business_name: String,
    pub trade_name: String,
    pub ownership_type: String,
    pub business_address: String,
    pub business_city: String,
    pub business_state: String,
    pub business_zip: String,
    pub business_phone: String,
}

impl CombinedReportRow {
    pub fn from_pair(rental: &RentalLicense, business: &BusinessLicense) -> Self {
        Self {
            business_license: business.city_account_number.clone(),
            bnb_license: rental.license_id.clone(),
            ubi: business.ubi.clone(),
            unit_status: rental.unit_status.label().to_string(),
            license_status: rental.license_status.label().to_string(),
            legacy_status: rental.legacy_status.clone(),
            primary_residence: rental.primary_residence.clone(),
            unit_address: rental.address_line.clone(),
            property_type: rental.property_type.clone(),
            bedroom_count: rental.bedroom_count.clone(),
            business_name: business.business_legal_name.clone(),
            trade_name: business.trade_name.clone(),
            ownership_type: business.ownership_type.clone(),
            business_address: business.street_address.clone(),
            business_city: business.city.clone(),
            business_state: business.state.clone(),
            business_zip: business.zip.clone(),
            business_phone: business.business_phone.clone(),
        }
    }

    pub fn value(&self, column: ReportColumn) -> &str {
        match column {
            ReportColumn::BusinessLicense => &self.business_license,
            ReportColumn::BnbLicense => &self.bnb_license,
            ReportColumn::Ubi => &self.ubi,
            ReportColumn::UnitStatus => &self.unit_status,
            ReportColumn::LicenseStatus => &self.license_status,
            ReportColumn::LegacyStatus => &self.legacy_status,
            ReportColumn::PrimaryResidence => &self.primary_residence,
            ReportColumn::UnitAddress => &self.unit_address,
            ReportColumn::PropertyType => &self.property_type,
            ReportColumn::BedroomCount => &self.bedroom_count,
            ReportColumn::BusinessName => &self.business_name,
            ReportColumn::TradeName => &self.trade_name,
            ReportColumn::OwnershipType => &self.ownership_type,
            ReportColumn::BusinessAddress => &self.business_address,
            ReportColumn::BusinessCity => &self.business_city,
            ReportColumn::BusinessState => &self.business_state,
            ReportColumn::BusinessZip => &self.business_zip,
            ReportColumn::BusinessPhone => &self.business_phone,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        ReportColumn::ordered()
            .into_iter()
            .map(move |column| self.value(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{LicenseStatus, UnitStatus};

    #[test]
    fn header_row_matches_the_published_layout() {
        assert_eq!(
            REPORT_HEADERS,
            [
                "Business_License",
                "BnB_License",
                "UBI",
                "Unit_Status",
                "License_Status",
                "Legacy_Status",
                "Primary_Residence",
                "Unit_Address",
                "Property_Type",
                "Bedroom_Count",
                "Business_Name",
                "Trade_Name",
                "Ownership_Type",
                "Business_Address",
                "Business_City",
                "Business_State",
                "Business_ZIP",
                "Business_Phone",
            ]
        );
    }

    #[test]
    fn each_field_lands_under_its_own_header() {
        let rental = RentalLicense {
            business_license_number: "71766".to_string(),
            license_id: "STR-1".to_string(),
            unit_status: UnitStatus::Active,
            license_status: LicenseStatus::Expired,
            address_line: "123 PINE ST".to_string(),
            property_type: "Single Family".to_string(),
            bedroom_count: "3".to_string(),
            legacy_status: "Current".to_string(),
            primary_residence: "Yes".to_string(),
        };
        let business = BusinessLicense {
            city_account_number: "71766".to_string(),
            business_legal_name: "Acme BnB LLC".to_string(),
            trade_name: "Acme Stays".to_string(),
            ownership_type: "LLC".to_string(),
            street_address: "9 MAIN ST".to_string(),
            city: "SEATTLE".to_string(),
            state: "WA".to_string(),
            zip: "98101".to_string(),
            business_phone: "2065550100".to_string(),
            ubi: "604000000".to_string(),
            ..BusinessLicense::default()
        };

        let row = CombinedReportRow::from_pair(&rental, &business);
        assert_eq!(row.value(ReportColumn::UnitStatus), "Active");
        assert_eq!(row.value(ReportColumn::LicenseStatus), "Expired");
        assert_eq!(row.value(ReportColumn::BusinessAddress), "9 MAIN ST");
        assert_eq!(row.value(ReportColumn::UnitAddress), "123 PINE ST");
        assert_eq!(row.value(ReportColumn::Ubi), "604000000");
        assert_eq!(row.values().count(), REPORT_HEADERS.len());
    }
}
