//! Reconciliation of the remote snapshot with local pending writes.
//!
//! This is the single merge point the rest of the application observes.
//! The engine is a pure function: no caching, no hidden state, no input
//! mutation. Callers re-run it after every mutating intent with freshly
//! read store collections.

use crate::types::{
    AddressType, Community, HouseholdWaste, Record, ResponsiblePerson, Road, WastewaterMgmt,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Merge the remote snapshot with the three local collections into the
/// record sequence the application displays.
///
/// Precedence, in order:
/// 1. Tombstoned ids are excluded from the remote rows, even when an
///    override also exists for the id.
/// 2. Surviving remote rows are replaced wholesale by their override when
///    one exists, never merged field by field.
/// 3. Locally created records come first, in their stored (newest-first)
///    order, ahead of all processed remote rows.
///
/// `remote: None` means the source was unreachable, which is not the same
/// as an empty sheet: only when the merged result is empty AND the source
/// was unreachable does the fixed demonstration dataset stand in, so a
/// first run without connectivity is not a blank screen.
pub fn reconcile(
    remote: Option<Vec<Record>>,
    local_new: &[Record],
    overrides: &HashMap<String, Record>,
    tombstones: &HashSet<String>,
) -> Vec<Record> {
    let source_unreachable = remote.is_none();

    let processed_remote: Vec<Record> = remote
        .unwrap_or_default()
        .into_iter()
        .filter(|record| !tombstones.contains(&record.id))
        .map(|record| match overrides.get(&record.id) {
            Some(replacement) => replacement.clone(),
            None => record,
        })
        .collect();

    debug!(
        remote = processed_remote.len(),
        local = local_new.len(),
        "reconciled snapshot"
    );

    let mut merged = Vec::with_capacity(local_new.len() + processed_remote.len());
    merged.extend_from_slice(local_new);
    merged.extend(processed_remote);

    if merged.is_empty() && source_unreachable {
        return fallback_records();
    }

    merged
}

/// Fixed demonstration dataset shown when the sheet is unreachable and no
/// local state exists. A UX fallback only; it must never mask a reachable
/// but empty sheet.
pub fn fallback_records() -> Vec<Record> {
    vec![
        Record {
            id: "1".into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            address_type: AddressType::House,
            shop_name: None,
            full_name: "สมชาย รักดี".into(),
            community: Community::Panglor,
            address: "123/45".into(),
            road: Some(Road::KhunLumPraphat),
            phone: "081-234-5678".into(),
            household_waste: HouseholdWaste::GreenBagNew,
            wastewater_mgmt: WastewaterMgmt::GreaseTrap,
            responsible_person: ResponsiblePerson::Pin,
            image_url: Some("https://picsum.photos/400/300?random=1".into()),
            lat: Some(19.3020),
            lng: Some(97.9654),
            residents_count: 4,
        },
        Record {
            id: "2".into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            address_type: AddressType::Restaurant,
            shop_name: Some("ร้านอาหารป้าศรี".into()),
            full_name: "สมศรี มีทรัพย์".into(),
            community: Community::Kadkao,
            address: "44/1".into(),
            road: Some(Road::SinghanatBamrung),
            phone: "089-999-8888".into(),
            household_waste: HouseholdWaste::WetBinOld,
            wastewater_mgmt: WastewaterMgmt::PublicSewer,
            responsible_person: ResponsiblePerson::Tom,
            image_url: Some("https://picsum.photos/400/300?random=2".into()),
            lat: Some(19.2980),
            lng: Some(97.9620),
            residents_count: 6,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> Record {
        Record {
            id: id.to_string(),
            timestamp: "t".into(),
            address_type: AddressType::House,
            shop_name: None,
            full_name: name.to_string(),
            community: Community::Panglor,
            address: "1".into(),
            road: None,
            phone: "-".into(),
            household_waste: HouseholdWaste::GreenBagNew,
            wastewater_mgmt: WastewaterMgmt::GreaseTrap,
            responsible_person: ResponsiblePerson::Pin,
            image_url: None,
            lat: None,
            lng: None,
            residents_count: 1,
        }
    }

    #[test]
    fn tombstone_wins_over_override() {
        let remote = vec![record("sheet-0-a", "keep"), record("sheet-1-b", "gone")];
        let mut overrides = HashMap::new();
        overrides.insert("sheet-1-b".to_string(), record("sheet-1-b", "edited"));
        let tombstones: HashSet<String> = ["sheet-1-b".to_string()].into();

        let merged = reconcile(Some(remote), &[], &overrides, &tombstones);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "sheet-0-a");
    }

    #[test]
    fn override_replaces_wholesale() {
        let mut original = record("sheet-0-a", "original");
        original.residents_count = 9;
        original.image_url = Some("https://example.com/old.jpg".into());

        let replacement = record("sheet-0-a", "edited");
        let mut overrides = HashMap::new();
        overrides.insert("sheet-0-a".to_string(), replacement.clone());

        let merged = reconcile(Some(vec![original]), &[], &overrides, &HashSet::new());
        // The whole record is the override, not a field-by-field merge.
        assert_eq!(merged[0], replacement);
    }

    #[test]
    fn local_records_precede_remote() {
        let remote = vec![record("sheet-0-a", "remote")];
        let local = vec![record("local-2", "newest"), record("local-1", "older")];

        let merged = reconcile(Some(remote), &local, &HashMap::new(), &HashSet::new());
        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["local-2", "local-1", "sheet-0-a"]);
    }

    #[test]
    fn reconcile_is_idempotent_and_does_not_mutate_inputs() {
        let remote = vec![record("sheet-0-a", "r")];
        let local = vec![record("local-1", "l")];
        let mut overrides = HashMap::new();
        overrides.insert("sheet-0-a".to_string(), record("sheet-0-a", "edited"));
        let tombstones = HashSet::new();

        let first = reconcile(Some(remote.clone()), &local, &overrides, &tombstones);
        let second = reconcile(Some(remote.clone()), &local, &overrides, &tombstones);
        assert_eq!(first, second);
        assert_eq!(local[0].full_name, "l");
        assert_eq!(overrides["sheet-0-a"].full_name, "edited");
    }

    #[test]
    fn unreachable_source_with_no_local_state_yields_fallback() {
        let merged = reconcile(None, &[], &HashMap::new(), &HashSet::new());
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].is_local());
    }

    #[test]
    fn reachable_empty_source_stays_empty() {
        let merged = reconcile(Some(vec![]), &[], &HashMap::new(), &HashSet::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn unreachable_source_with_local_records_shows_local_only() {
        let local = vec![record("local-1", "mine")];
        let merged = reconcile(None, &local, &HashMap::new(), &HashSet::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "local-1");
    }

    #[test]
    fn overrides_for_unknown_ids_are_ignored() {
        let mut overrides = HashMap::new();
        overrides.insert("sheet-9-z".to_string(), record("sheet-9-z", "orphan"));

        let merged = reconcile(
            Some(vec![record("sheet-0-a", "r")]),
            &[],
            &overrides,
            &HashSet::new(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].full_name, "r");
    }
}
