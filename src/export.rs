//! Export of reconciled data back toward the spreadsheet world.
//!
//! Two formats: a tab-separated blob of locally created records whose
//! column order matches the sheet's ordinal layout, meant to be pasted at
//! the end of the sheet by the operator (there is no automated push), and
//! a full-dataset report with localized headers in current reconciled
//! order.

use crate::types::Record;
use anyhow::Result;
use std::io::Write;

/// Localized header row for the full report, one column per sheet field.
pub const REPORT_HEADERS: &[&str] = &[
    "เวลาบันทึก",
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
    "ละติจูด",
    "ลองจิจูด",
    "ลิงค์รูปภาพ",
];

/// Tab-separated lines for every local-namespaced record, in the sheet's
/// ordinal column order. Returns `None` when there is nothing pending.
pub fn pending_rows(records: &[Record]) -> Option<String> {
    let local: Vec<&Record> = records.iter().filter(|r| r.is_local()).collect();
    if local.is_empty() {
        return None;
    }

    let rows: Vec<String> = local
        .iter()
        .map(|r| {
            [
                r.timestamp.clone(),
                r.address_type.label().to_string(),
                r.full_name.clone(),
                r.community.label().to_string(),
                r.address.clone(),
                r.road.map(|road| road.label().to_string()).unwrap_or_default(),
                r.phone.clone(),
                r.household_waste.label().to_string(),
                r.image_url.clone().unwrap_or_default(),
                r.wastewater_mgmt.label().to_string(),
                r.responsible_person.label().to_string(),
                r.residents_count.to_string(),
                r.lat.map(|v| v.to_string()).unwrap_or_default(),
                r.lng.map(|v| v.to_string()).unwrap_or_default(),
                r.shop_name.clone().unwrap_or_default(),
            ]
            .join("\t")
        })
        .collect();

    Some(rows.join("\n"))
}

/// Write the full dataset as a report with localized headers, one row per
/// record in the given (reconciled) order.
pub fn write_report_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_HEADERS)?;

    for r in records {
        csv_writer.write_record(&[
            r.timestamp.as_str(),
            r.address_type.label(),
            r.shop_name.as_deref().unwrap_or(""),
            r.full_name.as_str(),
            r.community.label(),
            r.address.as_str(),
            r.road.map(|road| road.label()).unwrap_or(""),
            r.phone.as_str(),
            &r.residents_count.to_string(),
            r.household_waste.label(),
            r.wastewater_mgmt.label(),
            r.responsible_person.label(),
            &r.lat.map(|v| v.to_string()).unwrap_or_default(),
            &r.lng.map(|v| v.to_string()).unwrap_or_default(),
            r.image_url.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
