//! Structural extraction of one invoice page into a flat [`PageRecord`].
//!
//! An invoice page has a mandatory user section, an optional site section
//! (both label/value lists), and an optional meter reading table whose rows
//! produce a dynamically-named set of fields per classified meter.

use crate::error::{Result, StructureError};
use crate::fatura::helper::{element_text, html_selector};
use crate::model::{MeterType, PageRecord, DEVICE_PLACEHOLDER};
use scraper::{ElementRef, Html};
use std::collections::HashSet;

const USER_SECTION_SELECTOR: &str = "#cikti .d45";
const SITE_SECTION_SELECTOR: &str = "#cikti .d45r";
const METER_TABLE_SELECTOR: &str = "table.table2";

const USER_LABELS: [&str; 4] = ["Kullanıcı Adı", "Daire No", "Fatura Dönemi", "Abone Numarası"];
const SITE_LABELS: [&str; 3] = ["Site Adı", "Adres", "İlçe / İl"];

/// A meter row carries device, room, and reading cells; anything shorter is
/// a header or malformed row.
const METER_ROW_MIN_CELLS: usize = 7;

/// Extracts a single invoice page into a flat record.
///
/// The user section is mandatory; its absence fails the page. The site
/// section and the meter table are optional: base fields default to empty
/// strings and an absent table simply adds no meter fields.
pub fn extract(html: &str) -> Result<PageRecord, StructureError> {
    let document = Html::parse_document(html);

    let mut record = PageRecord::new();
    for label in USER_LABELS.iter().chain(SITE_LABELS.iter()) {
        record.insert(*label, "");
    }

    let user_selector = html_selector(USER_SECTION_SELECTOR)?;
    let user_section = document
        .select(&user_selector)
        .next()
        .ok_or_else(|| StructureError::section_missing(USER_SECTION_SELECTOR))?;
    scan_label_values(&user_section, &USER_LABELS, &mut record)?;

    let site_selector = html_selector(SITE_SECTION_SELECTOR)?;
    if let Some(site_section) = document.select(&site_selector).next() {
        scan_label_values(&site_section, &SITE_LABELS, &mut record)?;
    }

    let table_selector = html_selector(METER_TABLE_SELECTOR)?;
    if let Some(table) = document.select(&table_selector).next() {
        scan_meter_table(&table, &mut record)?;
    }

    Ok(record)
}

/// Scans a section's `div` children for `strong` label / `span` value pairs
/// and assigns values whose label contains one of the known label strings.
/// Unmatched labels are ignored.
fn scan_label_values(
    section: &ElementRef,
    labels: &[&str],
    record: &mut PageRecord,
) -> Result<(), StructureError> {
    let div_selector = html_selector("div")?;
    let strong_selector = html_selector("strong")?;
    let span_selector = html_selector("span")?;

    for div in section.select(&div_selector) {
        let Some(strong) = div.select(&strong_selector).next() else {
            continue;
        };
        let Some(span) = div.select(&span_selector).next() else {
            continue;
        };

        let label_text = element_text(&strong);
        if let Some(label) = labels.iter().find(|label| label_text.contains(**label)) {
            record.insert(*label, element_text(&span));
        }
    }

    Ok(())
}

/// Scans the meter table, classifying each valid row and appending its five
/// reading attributes under a per-page-unique meter label.
fn scan_meter_table(table: &ElementRef, record: &mut PageRecord) -> Result<(), StructureError> {
    let row_selector = html_selector("tr")?;
    let cell_selector = html_selector("td")?;

    let mut used_labels: HashSet<String> = HashSet::new();

    for row in table.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| element_text(&cell))
            .collect();
        if cells.len() < METER_ROW_MIN_CELLS {
            continue;
        }

        let device_no = &cells[0];
        let room = &cells[1];
        let Some(meter_type) = MeterType::classify(room, device_no) else {
            continue;
        };

        let label = unique_label(meter_type.to_string(), &mut used_labels);
        let device_value = if device_no == DEVICE_PLACEHOLDER {
            String::new()
        } else {
            device_no.clone()
        };

        record.insert(format!("{} Cihaz No", label), device_value);
        record.insert(format!("{} Tarih", label), cells[3].clone());
        record.insert(format!("{} Önceki Değer", label), cells[4].clone());
        record.insert(format!("{} Yeni Değer", label), cells[5].clone());
        record.insert(format!("{} Tüketim", label), cells[6].clone());
    }

    Ok(())
}

/// Disambiguates a repeated meter label with an incrementing counter suffix
/// ("Kalorimetre", "Kalorimetre 2", "Kalorimetre 3", ...).
fn unique_label(base: String, used: &mut HashSet<String>) -> String {
    let mut label = base.clone();
    let mut counter = 1;
    while used.contains(&label) {
        counter += 1;
        label = format!("{} {}", base, counter);
    }
    used.insert(label.clone());
    label
}
