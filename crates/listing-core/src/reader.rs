//! Readers that turn CSV files and spreadsheets into a [`Table`]

use crate::error::{Error, Result};
use crate::table::{CellValue, Column, Table};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions handled by [`read_workbook`]
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read a CSV or spreadsheet file, choosing the reader by extension
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => read_csv(path),
        e if WORKBOOK_EXTENSIONS.contains(&e) => read_workbook(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "cannot read '{}' (expected .csv or a spreadsheet)",
            path.display()
        ))),
    }
}

/// Parse a CSV file into a Table
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_csv_reader(BufReader::new(file), path.to_path_buf())
}

/// Parse CSV from a string
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<Table> {
    parse_csv_reader(content.as_bytes(), PathBuf::from(source_name))
}

fn parse_csv_reader<R: Read>(reader: R, path: PathBuf) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::CsvParse {
            path,
            message: "no columns found in CSV".to_string(),
        });
    }

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        if record.len() > headers.len() {
            warn!(
                row = row_idx + 1,
                file = %path.display(),
                "row has more cells than columns, truncating"
            );
        }
        rows.push(record.iter().map(CellValue::from_text).collect());
    }

    build_table(&headers, rows)
}

/// Read the first worksheet of a spreadsheet; its first row is the header
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let workbook_error = |message: String| Error::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("no worksheet found".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| c.to_string()).collect(),
        None => return Err(workbook_error("worksheet is empty".to_string())),
    };

    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    debug!(
        file = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read workbook"
    );

    build_table(&headers, rows)
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        other => CellValue::Other(other.to_string()),
    }
}

/// Pivot row-major cells into columns, padding short rows and truncating long ones
fn build_table(headers: &[String], rows: Vec<Vec<CellValue>>) -> Result<Table> {
    let mut values: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); headers.len()];

    for row in rows {
        let mut cells = row.into_iter();
        for column in values.iter_mut() {
            column.push(cells.next().unwrap_or(CellValue::Missing));
        }
    }

    let columns = headers
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (name, values))| Column::new(header_name(name, i), values))
        .collect();
    Table::from_columns(columns)
}

/// Blank headers get a positional placeholder name
fn header_name(name: &str, index: usize) -> String {
    if name.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_csv() {
        let csv = "Barkod,Ürün Adı,Satıcı Stok Kodu\n111,Shoe,S-1\n222,Hat,\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.column_names(), vec!["Barkod", "Ürün Adı", "Satıcı Stok Kodu"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.find_column("Barkod").unwrap().values,
            vec![
                CellValue::Text("111".to_string()),
                CellValue::Text("222".to_string())
            ]
        );
        assert_eq!(table.columns[2].values[1], CellValue::Missing);
    }

    #[test]
    fn test_parse_keeps_leading_zeros_as_text() {
        let csv = "Barkod\n0086900001\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(
            table.columns[0].values[0],
            CellValue::Text("0086900001".to_string())
        );
    }

    #[test]
    fn test_parse_ragged_rows() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[1].values[0], CellValue::Missing);
        assert_eq!(table.columns[2].values[1], CellValue::Text("3".to_string()));
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_blank_header_named() {
        let csv = "Barkod,,Marka\n1,x,y\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.column_names(), vec!["Barkod", "Unnamed: 1", "Marka"]);
    }

    #[test]
    fn test_parse_no_columns() {
        let err = parse_csv_str("", "empty.csv").unwrap_err();
        assert!(matches!(err, Error::CsvParse { .. }));
    }

    #[test]
    fn test_read_table_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        write!(file, "barcode,product name\n 9 ,Cap\n").unwrap();

        let table = read_table(file.path()).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns[0].values[0].to_trimmed_string(), "9");
    }

    #[test]
    fn test_read_table_unsupported_extension() {
        let err = read_table("listing.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_csv_missing_file() {
        let err = read_csv("/nonexistent/listing.csv").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_read_workbook_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        write!(file, "not a zip archive").unwrap();

        let err = read_table(file.path()).unwrap_err();
        assert!(matches!(err, Error::Workbook { .. }));
    }

    #[test]
    fn test_read_workbook_numeric_barcode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["Barkod", "Ürün Adı", "Satıcı Stok Kodu"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_number(1, 0, 8690000000001.0).unwrap();
        sheet.write_number(2, 0, 8690000000002.0).unwrap();
        sheet.write_number(3, 0, 8690000000003.0).unwrap();
        sheet.write_string(1, 1, "Shoe").unwrap();
        sheet.write_string(2, 1, "Hat").unwrap();
        sheet.write_string(3, 1, "Bag").unwrap();
        sheet.write_string(1, 2, "nan").unwrap();
        sheet.write_string(2, 2, " X ").unwrap();
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.column_names(), vec!["Barkod", "Ürün Adı", "Satıcı Stok Kodu"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns[0].values[0], CellValue::Number(8690000000001.0));
        assert_eq!(table.columns[2].values[2], CellValue::Missing);

        let out = crate::transform::transform(&table).unwrap();
        assert_eq!(
            out.columns[0].trimmed_strings(),
            vec!["8690000000001", "8690000000002", "8690000000003"]
        );
        assert_eq!(
            out.find_column("Satıcı Stok Kodu").unwrap().trimmed_strings(),
            vec!["8690000000001", "X", "8690000000003"]
        );
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Missing);
        assert_eq!(cell_from_data(&Data::Int(111)), CellValue::Number(111.0));
        assert_eq!(cell_from_data(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            cell_from_data(&Data::String("ABC".to_string())),
            CellValue::Text("ABC".to_string())
        );
        assert_eq!(cell_from_data(&Data::String(String::new())), CellValue::Missing);
        assert_eq!(
            cell_from_data(&Data::Bool(true)),
            CellValue::Other("true".to_string())
        );
    }
}
