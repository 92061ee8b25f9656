//! Export of tables as CSV, JSON or a single-sheet workbook

use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::table::{CellValue, Table, MAX_INTEGRAL};
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnsupportedFormat(format!(
                "{} (supported formats: xlsx, csv, json)",
                other
            ))),
        }
    }
}

/// Write `table` as CSV with a header row
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| Error::Csv {
        path: PathBuf::from("<output>"),
        source: e,
    };

    csv_writer.write_record(table.column_names()).map_err(csv_err)?;
    for row in 0..table.row_count() {
        let record = table
            .columns
            .iter()
            .map(|c| c.values[row].to_trimmed_string());
        csv_writer.write_record(record).map_err(csv_err)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `table` as CSV text
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::UnsupportedFormat(e.to_string()))
}

/// Rows as JSON objects keyed by header; numbers stay numbers
pub fn to_json(table: &Table) -> Value {
    let rows = (0..table.row_count())
        .map(|row| {
            let object: Map<String, Value> = table
                .columns
                .iter()
                .map(|c| (c.name.clone(), cell_to_json(&c.values[row])))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_INTEGRAL => {
            Value::from(*n as i64)
        }
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Missing => Value::Null,
        CellValue::Text(s) | CellValue::Other(s) => Value::String(s.clone()),
    }
}

/// Write `table` as a workbook with one sheet named `sheet_name`
///
/// Header row first; numbers are written as numbers, missing cells left blank.
pub fn write_xlsx<P: AsRef<Path>>(table: &Table, path: P, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, column) in table.columns.iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, column.name.as_str())?;

        for (row, cell) in column.values.iter().enumerate() {
            if cell.is_missing() {
                continue;
            }
            let row = row as u32 + 1;
            match cell {
                CellValue::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                CellValue::Text(s) | CellValue::Other(s) => {
                    sheet.write_string(row, col, s.as_str())?;
                }
                CellValue::Missing => {}
            }
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

/// Write `table` to `path` in the given format
///
/// `sheet_name` only applies to [`ExportFormat::Xlsx`].
pub fn export<P: AsRef<Path>>(
    table: &Table,
    path: P,
    format: ExportFormat,
    sheet_name: &str,
) -> Result<()> {
    match format {
        ExportFormat::Xlsx => write_xlsx(table, path, sheet_name),
        ExportFormat::Csv => {
            let mut writer = BufWriter::new(File::create(path.as_ref())?);
            write_csv(table, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        ExportFormat::Json => {
            let mut writer = BufWriter::new(File::create(path.as_ref())?);
            serde_json::to_writer_pretty(&mut writer, &to_json(table))?;
            writeln!(writer)?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// `{stem}_{suffix}_{date}.{ext}` next to the input file
pub fn default_output_path(
    input: &Path,
    config: &ConvertConfig,
    date: NaiveDate,
    format: ExportFormat,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!(
        "{}_{}_{}.{}",
        stem,
        config.file_suffix,
        date.format("%Y-%m-%d"),
        format.extension()
    );
    input.with_file_name(file_name)
}
