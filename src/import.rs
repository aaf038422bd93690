//! Bulk-import parsing for semi-structured spreadsheet exports.
//!
//! Columns are located by header label, trying the Thai label first and an
//! English fallback second, in any column order; extra columns are ignored.
//! The policy is deliberately lenient: a row needs only a name and an
//! address to be accepted, and malformed classification values degrade to
//! per-field defaults instead of rejecting the row. Enum matching is exact
//! only; messy data becomes the default category, never a fuzzy guess.

use crate::error::{DataError, DataResult};
use crate::types::{
    AddressType, Community, HouseholdWaste, RecordDraft, ResponsiblePerson, Road, WastewaterMgmt,
};
use anyhow::Context;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Primary (Thai) and fallback (English) header labels per field.
struct Header {
    primary: &'static str,
    fallback: &'static str,
}

const FULL_NAME: Header = Header { primary: "ชื่อ-นามสกุล", fallback: "Full Name" };
const ADDRESS: Header = Header { primary: "บ้านเลขที่", fallback: "Address" };
const PHONE: Header = Header { primary: "เบอร์โทร", fallback: "Phone" };
const ADDRESS_TYPE: Header = Header { primary: "ประเภทที่อยู่", fallback: "Address Type" };
const SHOP_NAME: Header = Header { primary: "ชื่อร้าน", fallback: "Shop Name" };
const COMMUNITY: Header = Header { primary: "ชุมชน", fallback: "Community" };
const ROAD: Header = Header { primary: "ถนน", fallback: "Road" };
const RESIDENTS: Header = Header { primary: "จำนวนผู้อยู่อาศัย", fallback: "Residents" };
const HOUSEHOLD_WASTE: Header = Header { primary: "การจัดการขยะ", fallback: "Household Waste" };
const WASTEWATER: Header = Header { primary: "การจัดการน้ำเสีย", fallback: "Wastewater" };
const RESPONSIBLE: Header = Header { primary: "ผู้รับผิดชอบ", fallback: "Responsible Person" };

/// Header row for the downloadable import template.
pub fn template_headers() -> &'static [&'static str] {
    &[
        "ประเภทที่อยู่",
        "ชื่อร้าน",
        "ชื่อ-นามสกุล",
        "ชุมชน",
        "บ้านเลขที่",
        "ถนน",
        "เบอร์โทร",
        "จำนวนผู้อยู่อาศัย",
        "การจัดการขยะ",
        "การจัดการน้ำเสีย",
        "ผู้รับผิดชอบ",
    ]
}

/// Result of parsing an import file.
#[derive(Debug)]
pub struct ImportBatch {
    /// Accepted candidate records, in file order. Ids and timestamps are
    /// assigned later, at write time.
    pub records: Vec<RecordDraft>,
    /// Rows read from the file, including silently dropped ones.
    pub total_rows: usize,
}

impl ImportBatch {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn dropped(&self) -> usize {
        self.total_rows - self.records.len()
    }
}

/// Parse an import file from disk.
pub fn parse_import_path(path: &Path) -> DataResult<ImportBatch> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))
        .map_err(DataError::import_unreadable)?;
    parse_import(file)
}

/// Parse CSV import data from any reader.
///
/// Rows missing a name or an address are dropped without a per-row error;
/// the batch fails only when the file is not tabular at all or when zero
/// rows survive.
pub fn parse_import<R: Read>(reader: R) -> DataResult<ImportBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(DataError::import_unreadable)?
        .clone();

    let mut records = Vec::new();
    let mut total_rows = 0;
    for row in csv_reader.records() {
        let row = row.map_err(DataError::import_unreadable)?;
        total_rows += 1;
        if let Some(draft) = parse_row(&headers, &row) {
            records.push(draft);
        }
    }

    debug!(accepted = records.len(), total = total_rows, "import parsed");

    if records.is_empty() {
        return Err(DataError::empty_import());
    }

    Ok(ImportBatch {
        records,
        total_rows,
    })
}

/// Map one row to a draft, or drop it when name or address is missing.
fn parse_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> Option<RecordDraft> {
    let field = |header: &Header| -> String { lookup(headers, row, header) };

    let full_name = field(&FULL_NAME);
    let address = field(&ADDRESS);
    if full_name.is_empty() || address.is_empty() {
        return None;
    }

    let phone = field(&PHONE);
    Some(RecordDraft {
        address_type: AddressType::from_label(&field(&ADDRESS_TYPE)).unwrap_or_default(),
        shop_name: non_empty(field(&SHOP_NAME)),
        full_name,
        community: Community::from_label(&field(&COMMUNITY)).unwrap_or_default(),
        address,
        road: Road::from_label(&field(&ROAD)),
        phone: if phone.is_empty() { "-".to_string() } else { phone },
        residents_count: field(&RESIDENTS).parse().ok().filter(|n| *n >= 1).unwrap_or(1),
        household_waste: HouseholdWaste::from_label(&field(&HOUSEHOLD_WASTE)).unwrap_or_default(),
        wastewater_mgmt: WastewaterMgmt::from_label(&field(&WASTEWATER)).unwrap_or_default(),
        // Imports with no recognizable officer get "no responsible person",
        // unlike sheet rows which default to the first officer.
        responsible_person: ResponsiblePerson::from_label(&field(&RESPONSIBLE))
            .unwrap_or(ResponsiblePerson::None),
        image_url: None,
        lat: None,
        lng: None,
    })
}

/// Value of the column matching the primary label, falling back to the
/// alternate-language label. Missing columns read as empty.
fn lookup(headers: &csv::StringRecord, row: &csv::StringRecord, header: &Header) -> String {
    headers
        .iter()
        .position(|h| h.trim() == header.primary)
        .or_else(|| headers.iter().position(|h| h.trim() == header.fallback))
        .and_then(|position| row.get(position))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv_text: &str) -> DataResult<ImportBatch> {
        parse_import(csv_text.as_bytes())
    }

    #[test]
    fn accepts_row_with_name_and_address_drops_others() {
        let batch = parse(
            "ชื่อ-นามสกุล,บ้านเลขที่,ชุมชน\n\
             สมชาย,10,ชุมชนปางล้อ\n\
             ,20,\n",
        )
        .unwrap();

        assert_eq!(batch.accepted(), 1);
        assert_eq!(batch.total_rows, 2);
        assert_eq!(batch.dropped(), 1);
        let draft = &batch.records[0];
        assert_eq!(draft.full_name, "สมชาย");
        assert_eq!(draft.address, "10");
        assert_eq!(draft.community, Community::Panglor);
    }

    #[test]
    fn english_fallback_headers_work() {
        let batch = parse(
            "Full Name,Address,Phone\n\
             Somchai,99/1,081-000-0000\n",
        )
        .unwrap();

        assert_eq!(batch.accepted(), 1);
        assert_eq!(batch.records[0].full_name, "Somchai");
        assert_eq!(batch.records[0].phone, "081-000-0000");
    }

    #[test]
    fn unrecognized_enum_values_fall_back_to_defaults() {
        let batch = parse(
            "ชื่อ-นามสกุล,บ้านเลขที่,ประเภทที่อยู่,การจัดการขยะ,ผู้รับผิดชอบ,ถนน\n\
             สมชาย,10,คอนโด,ขยะทั่วไป,ใครก็ได้,ถนนที่ไม่มีจริง\n",
        )
        .unwrap();

        let draft = &batch.records[0];
        assert_eq!(draft.address_type, AddressType::House);
        assert_eq!(draft.household_waste, HouseholdWaste::GreenBagNew);
        assert_eq!(draft.responsible_person, ResponsiblePerson::None);
        assert_eq!(draft.road, None);
    }

    #[test]
    fn exact_enum_values_are_kept() {
        let batch = parse(
            "ชื่อ-นามสกุล,บ้านเลขที่,ชุมชน,การจัดการน้ำเสีย\n\
             สมหญิง,5,ชุมชนตะวันออก,ลงบ่อเกรอะ\n",
        )
        .unwrap();

        let draft = &batch.records[0];
        assert_eq!(draft.community, Community::East);
        assert_eq!(draft.wastewater_mgmt, WastewaterMgmt::SepticTank);
    }

    #[test]
    fn blank_phone_becomes_dash_and_residents_default_to_one() {
        let batch = parse(
            "ชื่อ-นามสกุล,บ้านเลขที่,เบอร์โทร,จำนวนผู้อยู่อาศัย\n\
             สมชาย,10,,ไม่ทราบ\n",
        )
        .unwrap();

        assert_eq!(batch.records[0].phone, "-");
        assert_eq!(batch.records[0].residents_count, 1);
    }

    #[test]
    fn column_order_is_free_and_extras_ignored() {
        let batch = parse(
            "หมายเหตุ,บ้านเลขที่,ชื่อร้าน,ชื่อ-นามสกุล\n\
             โน้ต,7/2,ร้านป้า,สมปอง\n",
        )
        .unwrap();

        let draft = &batch.records[0];
        assert_eq!(draft.full_name, "สมปอง");
        assert_eq!(draft.address, "7/2");
        assert_eq!(draft.shop_name.as_deref(), Some("ร้านป้า"));
    }

    #[test]
    fn zero_accepted_rows_is_a_batch_error() {
        let err = parse(
            "ชื่อ-นามสกุล,บ้านเลขที่\n\
             ,20\n\
             สมชาย,\n",
        )
        .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::EmptyImport);
    }

    #[test]
    fn header_only_file_is_a_batch_error() {
        let err = parse("ชื่อ-นามสกุล,บ้านเลขที่\n").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::EmptyImport);
    }

    #[test]
    fn template_headers_cover_every_importable_field() {
        let headers = template_headers();
        assert!(headers.contains(&"ชื่อ-นามสกุล"));
        assert!(headers.contains(&"บ้านเลขที่"));
        assert_eq!(headers.len(), 11);
    }
}
