//! Add subcommand for the waste-registry CLI.

use crate::error::{DataError, DataResult};
use crate::types::{
    AddressType, Community, HouseholdWaste, RecordDraft, ResponsiblePerson, Road, WastewaterMgmt,
};
use clap::Args;

/// Arguments for the add subcommand.
///
/// Classification flags take the exact Thai label; unlike the lenient bulk
/// import, an unrecognized label here is rejected so a typo on the command
/// line does not silently become the default category.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Full name (required)
    #[arg(long)]
    pub name: String,

    /// House number / street address (required)
    #[arg(long)]
    pub address: String,

    /// Phone number (required)
    #[arg(long)]
    pub phone: String,

    /// Address type label
    #[arg(long)]
    pub address_type: Option<String>,

    /// Shop name, for shop/restaurant premises
    #[arg(long)]
    pub shop_name: Option<String>,

    /// Community label
    #[arg(long)]
    pub community: Option<String>,

    /// Road label
    #[arg(long)]
    pub road: Option<String>,

    /// Residents count
    #[arg(long, default_value_t = 1)]
    pub residents: u32,

    /// Household waste method label
    #[arg(long)]
    pub household_waste: Option<String>,

    /// Wastewater method label
    #[arg(long)]
    pub wastewater: Option<String>,

    /// Responsible person label
    #[arg(long)]
    pub responsible: Option<String>,

    /// Image URL or data reference, stored verbatim
    #[arg(long)]
    pub image_url: Option<String>,

    /// Latitude (requires --lng)
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long)]
    pub lng: Option<f64>,
}

impl AddArgs {
    /// Build the record draft, rejecting unknown classification labels.
    pub fn into_draft(self) -> DataResult<RecordDraft> {
        let (lat, lng) = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
            (None, None) => (None, None),
            _ => {
                return Err(DataError::invalid_value(
                    "lat/lng",
                    "latitude and longitude must be given together",
                ));
            }
        };

        Ok(RecordDraft {
            address_type: parse_label(self.address_type, "address_type", AddressType::from_label)?
                .unwrap_or_default(),
            shop_name: self.shop_name,
            full_name: self.name,
            community: parse_label(self.community, "community", Community::from_label)?
                .unwrap_or_default(),
            address: self.address,
            road: parse_label(self.road, "road", Road::from_label)?,
            phone: self.phone,
            household_waste: parse_label(
                self.household_waste,
                "household_waste",
                HouseholdWaste::from_label,
            )?
            .unwrap_or_default(),
            wastewater_mgmt: parse_label(self.wastewater, "wastewater", WastewaterMgmt::from_label)?
                .unwrap_or_default(),
            responsible_person: parse_label(
                self.responsible,
                "responsible",
                ResponsiblePerson::from_label,
            )?
            .unwrap_or(ResponsiblePerson::None),
            image_url: self.image_url,
            lat,
            lng,
            residents_count: self.residents.max(1),
        })
    }
}

fn parse_label<T>(
    value: Option<String>,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> DataResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(label) => parse(label.trim())
            .map(Some)
            .ok_or_else(|| DataError::invalid_value(field, &format!("unknown label: {label}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            address: "10".into(),
            phone: "081-000-0000".into(),
            address_type: None,
            shop_name: None,
            community: None,
            road: None,
            residents: 1,
            household_waste: None,
            wastewater: None,
            responsible: None,
            image_url: None,
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn defaults_apply_when_labels_omitted() {
        let draft = args("สมชาย").into_draft().unwrap();
        assert_eq!(draft.address_type, AddressType::House);
        assert_eq!(draft.community, Community::Panglor);
        assert_eq!(draft.responsible_person, ResponsiblePerson::None);
        assert_eq!(draft.road, None);
    }

    #[test]
    fn unknown_label_is_rejected_not_defaulted() {
        let mut bad = args("สมชาย");
        bad.community = Some("หมู่บ้านอื่น".into());
        let err = bad.into_draft().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);
    }

    #[test]
    fn coordinates_must_come_in_pairs() {
        let mut half = args("สมชาย");
        half.lat = Some(19.3);
        let err = half.into_draft().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);

        let mut both = args("สมชาย");
        both.lat = Some(19.3);
        both.lng = Some(97.9);
        let draft = both.into_draft().unwrap();
        assert_eq!(draft.lat, Some(19.3));
        assert_eq!(draft.lng, Some(97.9));
    }
}
