//! Tabular export of a balance sheet (CSV and JSON).

use std::io;

use serde::Serialize;
use thiserror::Error;

use tabsplit_balances::BalanceSheet;

use crate::directory::UserDirectory;

/// Exported columns, in order.
pub const EXPORT_COLUMNS: [&str; 5] = ["user_id", "name", "paid", "owed", "net"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One exported line; amounts rendered as decimals (`-30.00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub user_id: String,
    pub name: String,
    pub paid: String,
    pub owed: String,
    pub net: String,
}

pub fn export_rows<D>(sheet: &BalanceSheet, directory: &D) -> Vec<ExportRow>
where
    D: UserDirectory + ?Sized,
{
    sheet
        .rows()
        .into_iter()
        .map(|row| ExportRow {
            user_id: row.user_id.to_string(),
            name: directory.display_name(row.user_id).unwrap_or_default(),
            paid: row.paid.to_string(),
            owed: row.owed.to_string(),
            net: row.net.to_string(),
        })
        .collect()
}

/// Writes the header and one record per user.
pub fn write_csv<W, D>(
    sheet: &BalanceSheet,
    directory: &D,
    writer: W,
    delimiter: u8,
) -> Result<(), ExportError>
where
    W: io::Write,
    D: UserDirectory + ?Sized,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(EXPORT_COLUMNS)?;
    for row in export_rows(sheet, directory) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string<D>(sheet: &BalanceSheet, directory: &D, delimiter: u8) -> Result<String, ExportError>
where
    D: UserDirectory + ?Sized,
{
    let mut buf = Vec::new();
    write_csv(sheet, directory, &mut buf, delimiter)?;
    Ok(String::from_utf8(buf)?)
}

/// Rows as a JSON array of objects keyed by [`EXPORT_COLUMNS`].
pub fn to_json<D>(sheet: &BalanceSheet, directory: &D) -> Result<serde_json::Value, ExportError>
where
    D: UserDirectory + ?Sized,
{
    Ok(serde_json::to_value(export_rows(sheet, directory))?)
}
