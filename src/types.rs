//! Core types for the waste registry.
//!
//! Every classification field is a closed vocabulary: a Rust enum with an
//! exhaustive display-label table. Parsing is exact-match only; anything
//! else falls back to a per-field default at the call site. Labels are the
//! Thai strings used by the shared spreadsheet.

use serde::{Deserialize, Serialize};

/// Prefix marking a record as created locally and not yet present in the
/// shared spreadsheet. This prefix is the sole routing signal for writes.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Type of premises being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressType {
    #[default]
    #[serde(rename = "บ้านเรือน")]
    House,
    #[serde(rename = "ร้านอาหาร")]
    Restaurant,
    #[serde(rename = "ร้านค้า")]
    Shop,
    #[serde(rename = "ที่พัก")]
    Accommodation,
    #[serde(rename = "สำนักงาน")]
    Office,
}

impl AddressType {
    pub const ALL: &[AddressType] = &[
        AddressType::House,
        AddressType::Restaurant,
        AddressType::Shop,
        AddressType::Accommodation,
        AddressType::Office,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AddressType::House => "บ้านเรือน",
            AddressType::Restaurant => "ร้านอาหาร",
            AddressType::Shop => "ร้านค้า",
            AddressType::Accommodation => "ที่พัก",
            AddressType::Office => "สำนักงาน",
        }
    }

    /// Exact-match lookup against the label table. No fuzzy matching.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// Municipal community the premises belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Community {
    #[default]
    #[serde(rename = "ชุมชนปางล้อ")]
    Panglor,
    #[serde(rename = "ชุมชนดอนเจดีย์")]
    Donjedi,
    #[serde(rename = "ชุมชนกาดเก่า")]
    Kadkao,
    #[serde(rename = "ชุมชนตะวันออก")]
    East,
    #[serde(rename = "ชุมชนหนองจองคำ")]
    Nongjongkham,
    #[serde(rename = "ชุมชนกลางเวียง")]
    Klangwiang,
}

impl Community {
    pub const ALL: &[Community] = &[
        Community::Panglor,
        Community::Donjedi,
        Community::Kadkao,
        Community::East,
        Community::Nongjongkham,
        Community::Klangwiang,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Community::Panglor => "ชุมชนปางล้อ",
            Community::Donjedi => "ชุมชนดอนเจดีย์",
            Community::Kadkao => "ชุมชนกาดเก่า",
            Community::East => "ชุมชนตะวันออก",
            Community::Nongjongkham => "ชุมชนหนองจองคำ",
            Community::Klangwiang => "ชุมชนกลางเวียง",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// Named municipal road. Unlike the other vocabularies a record may carry
/// no road at all, so there is no default variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Road {
    #[serde(rename = "ขุนลุมประพาส")]
    KhunLumPraphat,
    #[serde(rename = "สิงหนาทบำรุง")]
    SinghanatBamrung,
    #[serde(rename = "ผดุงม่วยต่อ")]
    PhadungMuaiTo,
    #[serde(rename = "ปางล้อนิคม")]
    PangLorNikhom,
    #[serde(rename = "อุดมชาวนิเทศ")]
    UdomChaoNithet,
    #[serde(rename = "นิเวศพิศาล")]
    NiwetPhisan,
    #[serde(rename = "ชำนาญสถิต")]
    ChamnanSathit,
    #[serde(rename = "ประดิษฐ์จองคำ")]
    PraditJongKham,
    #[serde(rename = "ราชธรรมพิทักษ์")]
    RatchathamPhithak,
    #[serde(rename = "มรรคสันติ")]
    MakSanti,
    #[serde(rename = "ศิริมงคล")]
    SiriMongkhon,
    #[serde(rename = "ประชาชนอุทิศ")]
    PrachachonUthit,
    #[serde(rename = "พาณิชย์วัฒนา")]
    PhanitWattana,
    #[serde(rename = "ประชาเสกสรร")]
    PrachaSeksan,
    #[serde(rename = "สัมพันธ์เจริญเมือง")]
    SamphanCharoenMueang,
    #[serde(rename = "รุ่งเรืองการค้า")]
    RungrueangKanKha,
    #[serde(rename = "นาวาคชสาร")]
    NawaKhotchasan,
    #[serde(rename = "บริบาลเมืองสุข")]
    BoribanMueangSuk,
}

impl Road {
    pub const ALL: &[Road] = &[
        Road::KhunLumPraphat,
        Road::SinghanatBamrung,
        Road::PhadungMuaiTo,
        Road::PangLorNikhom,
        Road::UdomChaoNithet,
        Road::NiwetPhisan,
        Road::ChamnanSathit,
        Road::PraditJongKham,
        Road::RatchathamPhithak,
        Road::MakSanti,
        Road::SiriMongkhon,
        Road::PrachachonUthit,
        Road::PhanitWattana,
        Road::PrachaSeksan,
        Road::SamphanCharoenMueang,
        Road::RungrueangKanKha,
        Road::NawaKhotchasan,
        Road::BoribanMueangSuk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Road::KhunLumPraphat => "ขุนลุมประพาส",
            Road::SinghanatBamrung => "สิงหนาทบำรุง",
            Road::PhadungMuaiTo => "ผดุงม่วยต่อ",
            Road::PangLorNikhom => "ปางล้อนิคม",
            Road::UdomChaoNithet => "อุดมชาวนิเทศ",
            Road::NiwetPhisan => "นิเวศพิศาล",
            Road::ChamnanSathit => "ชำนาญสถิต",
            Road::PraditJongKham => "ประดิษฐ์จองคำ",
            Road::RatchathamPhithak => "ราชธรรมพิทักษ์",
            Road::MakSanti => "มรรคสันติ",
            Road::SiriMongkhon => "ศิริมงคล",
            Road::PrachachonUthit => "ประชาชนอุทิศ",
            Road::PhanitWattana => "พาณิชย์วัฒนา",
            Road::PrachaSeksan => "ประชาเสกสรร",
            Road::SamphanCharoenMueang => "สัมพันธ์เจริญเมือง",
            Road::RungrueangKanKha => "รุ่งเรืองการค้า",
            Road::NawaKhotchasan => "นาวาคชสาร",
            Road::BoribanMueangSuk => "บริบาลเมืองสุข",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// How household waste is handled at the premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HouseholdWaste {
    #[default]
    #[serde(rename = "ถุงเขียว(รายใหม่)")]
    GreenBagNew,
    #[serde(rename = "ถุงเขียว(รายเก่า)")]
    GreenBagOld,
    #[serde(rename = "ถังขยะเปียก(รายใหม่)")]
    WetBinNew,
    #[serde(rename = "ถังขยะเปียก(รายเก่า)")]
    WetBinOld,
    #[serde(rename = "นำไปเป็นอาหารของสัตว์")]
    AnimalFeed,
    #[serde(rename = "นำไปทำปุ๋ย")]
    Fertilizer,
}

impl HouseholdWaste {
    pub const ALL: &[HouseholdWaste] = &[
        HouseholdWaste::GreenBagNew,
        HouseholdWaste::GreenBagOld,
        HouseholdWaste::WetBinNew,
        HouseholdWaste::WetBinOld,
        HouseholdWaste::AnimalFeed,
        HouseholdWaste::Fertilizer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HouseholdWaste::GreenBagNew => "ถุงเขียว(รายใหม่)",
            HouseholdWaste::GreenBagOld => "ถุงเขียว(รายเก่า)",
            HouseholdWaste::WetBinNew => "ถังขยะเปียก(รายใหม่)",
            HouseholdWaste::WetBinOld => "ถังขยะเปียก(รายเก่า)",
            HouseholdWaste::AnimalFeed => "นำไปเป็นอาหารของสัตว์",
            HouseholdWaste::Fertilizer => "นำไปทำปุ๋ย",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// How wastewater leaves the premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WastewaterMgmt {
    #[default]
    #[serde(rename = "มีการติดตั้งถังดักไขมัน")]
    GreaseTrap,
    #[serde(rename = "ลงบ่อเกรอะ")]
    SepticTank,
    #[serde(rename = "ลงพื้นที่ส่วนบุคคล")]
    PrivateArea,
    #[serde(rename = "กำลังติดตั้งถังดักไขมัน")]
    InstallingTrap,
    #[serde(rename = "ปล่อยน้ำเสียลงท่อน้ำสาธารณะ")]
    PublicSewer,
}

impl WastewaterMgmt {
    pub const ALL: &[WastewaterMgmt] = &[
        WastewaterMgmt::GreaseTrap,
        WastewaterMgmt::SepticTank,
        WastewaterMgmt::PrivateArea,
        WastewaterMgmt::InstallingTrap,
        WastewaterMgmt::PublicSewer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WastewaterMgmt::GreaseTrap => "มีการติดตั้งถังดักไขมัน",
            WastewaterMgmt::SepticTank => "ลงบ่อเกรอะ",
            WastewaterMgmt::PrivateArea => "ลงพื้นที่ส่วนบุคคล",
            WastewaterMgmt::InstallingTrap => "กำลังติดตั้งถังดักไขมัน",
            WastewaterMgmt::PublicSewer => "ปล่อยน้ำเสียลงท่อน้ำสาธารณะ",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// Municipal officer responsible for the premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResponsiblePerson {
    #[default]
    #[serde(rename = "พี่ปิน")]
    Pin,
    #[serde(rename = "พี่ทอม")]
    Tom,
    #[serde(rename = "พี่สมศักดิ์")]
    Somsak,
    #[serde(rename = "ไม่มีผู้รับผิดชอบ")]
    None,
}

impl ResponsiblePerson {
    pub const ALL: &[ResponsiblePerson] = &[
        ResponsiblePerson::Pin,
        ResponsiblePerson::Tom,
        ResponsiblePerson::Somsak,
        ResponsiblePerson::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResponsiblePerson::Pin => "พี่ปิน",
            ResponsiblePerson::Tom => "พี่ทอม",
            ResponsiblePerson::Somsak => "พี่สมศักดิ์",
            ResponsiblePerson::None => "ไม่มีผู้รับผิดชอบ",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

/// A household sanitation record.
///
/// `id` is namespaced by provenance: `local-<millis>[-<index>]` for records
/// created here, `sheet-<row>-<rawTimestamp>` for rows parsed from the
/// shared spreadsheet. `timestamp` is an opaque string; the remote format
/// is whatever the sheet holds, the local format is locale-formatted at
/// write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub timestamp: String,
    pub address_type: AddressType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    pub full_name: String,
    pub community: Community,
    pub address: String,
    /// Serialized as the road label, or the empty string when unset.
    #[serde(default, with = "road_label")]
    pub road: Option<Road>,
    pub phone: String,
    pub household_waste: HouseholdWaste,
    pub wastewater_mgmt: WastewaterMgmt,
    pub responsible_person: ResponsiblePerson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Latitude and longitude are both present or both absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub residents_count: u32,
}

impl Record {
    /// Whether this record was created locally (never yet in the sheet).
    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }
}

/// Whether an identifier belongs to the local namespace.
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// A record as submitted by a form or an import row, before an identifier
/// and creation timestamp are assigned by the write router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub address_type: AddressType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    pub full_name: String,
    pub community: Community,
    pub address: String,
    #[serde(default, with = "road_label")]
    pub road: Option<Road>,
    pub phone: String,
    pub household_waste: HouseholdWaste,
    pub wastewater_mgmt: WastewaterMgmt,
    pub responsible_person: ResponsiblePerson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub residents_count: u32,
}

impl RecordDraft {
    /// Finalize the draft into a full record.
    pub fn into_record(self, id: String, timestamp: String) -> Record {
        Record {
            id,
            timestamp,
            address_type: self.address_type,
            shop_name: self.shop_name,
            full_name: self.full_name,
            community: self.community,
            address: self.address,
            road: self.road,
            phone: self.phone,
            household_waste: self.household_waste,
            wastewater_mgmt: self.wastewater_mgmt,
            responsible_person: self.responsible_person,
            image_url: self.image_url,
            lat: self.lat,
            lng: self.lng,
            residents_count: self.residents_count,
        }
    }
}

/// Serde helper mapping `Option<Road>` to the road label, with the empty
/// string standing in for "no road". Unrecognized labels deserialize to
/// `None` rather than failing, matching the lenient sheet data.
mod road_label {
    use super::Road;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(road: &Option<Road>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(road.map(|r| r.label()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Road>, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Road::from_label(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_parsing_only() {
        assert_eq!(Community::from_label("ชุมชนปางล้อ"), Some(Community::Panglor));
        // Partial or padded labels never match.
        assert_eq!(Community::from_label("ปางล้อ"), None);
        assert_eq!(Community::from_label("ชุมชนปางล้อ "), None);
        assert_eq!(AddressType::from_label(""), None);
    }

    #[test]
    fn label_tables_round_trip() {
        for v in AddressType::ALL {
            assert_eq!(AddressType::from_label(v.label()), Some(*v));
        }
        for v in Road::ALL {
            assert_eq!(Road::from_label(v.label()), Some(*v));
        }
        for v in HouseholdWaste::ALL {
            assert_eq!(HouseholdWaste::from_label(v.label()), Some(*v));
        }
        for v in WastewaterMgmt::ALL {
            assert_eq!(WastewaterMgmt::from_label(v.label()), Some(*v));
        }
        for v in ResponsiblePerson::ALL {
            assert_eq!(ResponsiblePerson::from_label(v.label()), Some(*v));
        }
    }

    #[test]
    fn id_namespace_routing_signal() {
        assert!(is_local_id("local-1700000000000"));
        assert!(is_local_id("local-1700000000000-3"));
        assert!(!is_local_id("sheet-3-2024"));
        assert!(!is_local_id("1"));
    }

    #[test]
    fn record_serde_uses_thai_labels_and_camel_case() {
        let record = Record {
            id: "local-1".into(),
            timestamp: "1/1/2025 10:00:00".into(),
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
            image_url: None,
            lat: Some(19.298),
            lng: Some(97.962),
            residents_count: 6,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["addressType"], "ร้านอาหาร");
        assert_eq!(json["road"], "สิงหนาทบำรุง");
        assert_eq!(json["fullName"], "สมศรี มีทรัพย์");
        assert!(json.get("imageUrl").is_none());

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn blank_road_deserializes_to_none() {
        let json = serde_json::json!({
            "id": "sheet-0-x",
            "timestamp": "x",
            "addressType": "บ้านเรือน",
            "fullName": "สมชาย",
            "community": "ชุมชนปางล้อ",
            "address": "10",
            "road": "",
            "phone": "-",
            "householdWaste": "ถุงเขียว(รายใหม่)",
            "wastewaterMgmt": "มีการติดตั้งถังดักไขมัน",
            "responsiblePerson": "พี่ปิน",
            "residentsCount": 1
        });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.road, None);
    }
}
