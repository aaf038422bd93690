//! Aggregate statistics over the reconciled record set.

use crate::types::{AddressType, Community, HouseholdWaste, Record, WastewaterMgmt};
use serde::Serialize;
use std::collections::BTreeMap;

/// Dashboard aggregates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub total_records: usize,
    pub total_residents: u64,
    pub local_pending: usize,
    /// Counts keyed by display label, ordered for stable output.
    pub by_community: BTreeMap<String, usize>,
    pub by_household_waste: BTreeMap<String, usize>,
    pub by_wastewater: BTreeMap<String, usize>,
    pub by_address_type: BTreeMap<String, usize>,
}

impl Stats {
    /// Aggregate a reconciled record set.
    pub fn collect(records: &[Record]) -> Self {
        let mut stats = Stats {
            total_records: records.len(),
            ..Default::default()
        };

        // Seed every category so zero counts still show on the dashboard.
        for v in Community::ALL {
            stats.by_community.insert(v.label().to_string(), 0);
        }
        for v in HouseholdWaste::ALL {
            stats.by_household_waste.insert(v.label().to_string(), 0);
        }
        for v in WastewaterMgmt::ALL {
            stats.by_wastewater.insert(v.label().to_string(), 0);
        }
        for v in AddressType::ALL {
            stats.by_address_type.insert(v.label().to_string(), 0);
        }

        for record in records {
            stats.total_residents += u64::from(record.residents_count);
            if record.is_local() {
                stats.local_pending += 1;
            }
            *stats
                .by_community
                .entry(record.community.label().to_string())
                .or_default() += 1;
            *stats
                .by_household_waste
                .entry(record.household_waste.label().to_string())
                .or_default() += 1;
            *stats
                .by_wastewater
                .entry(record.wastewater_mgmt.label().to_string())
                .or_default() += 1;
            *stats
                .by_address_type
                .entry(record.address_type.label().to_string())
                .or_default() += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResponsiblePerson, Road};

    fn record(id: &str, community: Community, residents: u32) -> Record {
        Record {
            id: id.to_string(),
            timestamp: "t".into(),
            address_type: AddressType::House,
            shop_name: None,
            full_name: id.to_string(),
            community,
            address: "1".into(),
            road: None::<Road>,
            phone: "-".into(),
            household_waste: HouseholdWaste::GreenBagNew,
            wastewater_mgmt: WastewaterMgmt::GreaseTrap,
            responsible_person: ResponsiblePerson::Pin,
            image_url: None,
            lat: None,
            lng: None,
            residents_count: residents,
        }
    }

    #[test]
    fn aggregates_counts_and_residents() {
        let records = vec![
            record("local-1", Community::Panglor, 4),
            record("sheet-0-a", Community::Panglor, 2),
            record("sheet-1-b", Community::Kadkao, 6),
        ];
        let stats = Stats::collect(&records);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.total_residents, 12);
        assert_eq!(stats.local_pending, 1);
        assert_eq!(stats.by_community["ชุมชนปางล้อ"], 2);
        assert_eq!(stats.by_community["ชุมชนกาดเก่า"], 1);
        // Unused categories are present with zero counts.
        assert_eq!(stats.by_community["ชุมชนตะวันออก"], 0);
    }

    #[test]
    fn empty_input_has_seeded_zero_categories() {
        let stats = Stats::collect(&[]);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.by_household_waste.len(), HouseholdWaste::ALL.len());
        assert!(stats.by_wastewater.values().all(|&count| count == 0));
    }
}
