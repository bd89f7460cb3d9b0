//! Tabular export of accumulated invoice records.
//!
//! Records may differ in their dynamic meter fields, so the sheet's column
//! set is the union of all field names in discovery order; cells a record
//! lacks render empty. The whole workbook is materialized in memory.

use crate::error::{ExportError, Result};
use crate::model::PageRecord;
use chrono::Local;
use rust_xlsxwriter::Workbook;

pub const SHEET_NAME: &str = "Fatura Verileri";

const ID_COLUMN: &str = "ID";

/// Serializes the records into a single-sheet XLSX workbook in memory.
///
/// Fails with [`ExportError::EmptyInput`] on an empty record list rather
/// than silently producing an empty file.
pub fn export(records: &[PageRecord]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let columns = column_order(records);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in render_row(record, &columns).iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Union of all field names across the records, in discovery order, with the
/// `ID` column moved to the front when present.
fn column_order(records: &[PageRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }

    if let Some(pos) = columns.iter().position(|column| column == ID_COLUMN) {
        let id = columns.remove(pos);
        columns.insert(0, id);
    }

    columns
}

/// One record's cells in column order; missing fields render empty.
fn render_row<'a>(record: &'a PageRecord, columns: &[String]) -> Vec<&'a str> {
    columns
        .iter()
        .map(|column| record.get(column).unwrap_or(""))
        .collect()
}

/// Download-boundary filename convention embedding the record count.
pub fn export_filename(record_count: usize) -> String {
    format!(
        "fatura_data_{}_kayit_{}.xlsx",
        record_count,
        Local::now().timestamp_millis()
    )
}
