use super::types::{GearSizes, GuestRecord};
use super::Roster;
use crate::sizing::{ItemCategory, Size};
use crate::{Error, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const RESERVATION: &str = "Reservation #";
const GUEST_NAME: &str = "Guest Name";
const ADDRESS: &str = "Address";
const COUNTRY: &str = "Country";
const SEX: &str = "Sex";
const NOTES: &str = "Virtuoso";
const GEAR_ORDERED: &str = "Gear Ordered";

pub struct RosterReader;

impl RosterReader {
    /// Load a roster from a workbook (first worksheet) or a CSV export
    pub fn from_file(path: &Path) -> Result<Roster> {
        tracing::debug!("Reading roster from: {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let roster = match extension.as_str() {
            "csv" => Self::from_csv(std::fs::File::open(path)?)?,
            "xlsx" | "xlsm" | "xls" | "ods" => Self::from_workbook(path)?,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "'{}' (expected .xlsx, .xls, .ods or .csv)",
                    other
                )));
            }
        };

        tracing::info!("Loaded roster with {} guests", roster.len());
        Ok(roster)
    }

    /// Parse a roster from CSV data with a header row
    pub fn from_csv<R: Read>(input: R) -> Result<Roster> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        }

        Self::from_rows(rows)
    }

    fn from_workbook(path: &Path) -> Result<Roster> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::Workbook("workbook has no worksheets".to_string()))??;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
            .collect();

        Self::from_rows(rows)
    }

    /// Build a roster from raw rows, the first of which is the header
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Roster> {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| Error::InvalidStructure("roster is empty".to_string()))?;
        let columns = Columns::from_header(&header)?;

        let mut guests = Vec::new();
        // Sheet row numbers are 1-based and the header is row 1
        for (offset, row) in rows.enumerate() {
            let sheet_row = offset + 2;
            let name = columns.get(&row, GUEST_NAME).trim();
            let reservation = columns.get(&row, RESERVATION).trim();

            if name.is_empty() || reservation.is_empty() {
                tracing::debug!("Skipping blank roster row {}", sheet_row);
                continue;
            }

            let reservation = parse_reservation(reservation).ok_or_else(|| Error::InvalidRow {
                row: sheet_row,
                message: format!("invalid reservation number '{}'", reservation),
            })?;

            let sizes = columns.sizes(&row, sheet_row)?;

            guests.push(GuestRecord {
                index: guests.len(),
                reservation,
                name: name.to_string(),
                address: columns.get(&row, ADDRESS).trim().to_string(),
                country: columns.get(&row, COUNTRY).trim().to_string(),
                sex: columns.get(&row, SEX).trim().to_string(),
                sizes,
                notes: columns.optional(&row, NOTES),
                gear_ordered: columns.optional(&row, GEAR_ORDERED),
            });
        }

        Ok(Roster::new(guests))
    }
}

/// Header name to column position
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let required = [RESERVATION, GUEST_NAME, ADDRESS, COUNTRY, SEX]
            .into_iter()
            .chain(ItemCategory::ALL.iter().map(|c| c.column()));

        for column in required {
            if !positions.contains_key(column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        Ok(Self(positions))
    }

    fn get<'r>(&self, row: &'r [String], column: &str) -> &'r str {
        self.0
            .get(column)
            .and_then(|&i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn optional(&self, row: &[String], column: &str) -> Option<String> {
        let value = self.get(row, column).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn sizes(&self, row: &[String], sheet_row: usize) -> Result<GearSizes> {
        let invalid = |category: ItemCategory, err: Error| Error::InvalidRow {
            row: sheet_row,
            message: format!("{}: {}", category.column(), err),
        };
        let item = |category: ItemCategory| -> Result<Option<Size>> {
            Size::from_item_cell(self.get(row, category.column())).map_err(|e| invalid(category, e))
        };

        let racerback = self.get(row, ItemCategory::Racerback.column()).trim();
        let racerback = if racerback.is_empty() {
            None
        } else {
            Some(
                Size::from_sheet_name(racerback)
                    .map_err(|e| invalid(ItemCategory::Racerback, e))?,
            )
        };

        Ok(GearSizes {
            shirt: item(ItemCategory::Shirt)?,
            shorts: item(ItemCategory::Shorts)?,
            jersey: item(ItemCategory::Jersey)?,
            racerback,
            socks: !self.get(row, ItemCategory::Socks.column()).trim().is_empty(),
        })
    }
}

/// Reservation numbers arrive as "12345" from CSV and "12345.0" from some exports
fn parse_reservation(value: &str) -> Option<u64> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }

    let float = value.parse::<f64>().ok()?;
    (float >= 0.0 && float.fract() == 0.0).then_some(float as u64)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
