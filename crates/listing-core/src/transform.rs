//! Row transformer: source listing export → fixed six-column target table
//!
//! Only the barcode column is mandatory. Product name and supplier stock
//! code degrade to empty columns when absent, and an empty supplier stock
//! code is filled from the same row's barcode.

use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::resolver::ColumnIndex;
use crate::table::{CellValue, Column, Table};
use serde::Serialize;
use tracing::{debug, info};

/// Field name reported when the barcode column can't be found
pub const BARCODE_FIELD: &str = "Barcode";

/// Literal that spreadsheet exports write for a missing value
const NAN_LITERAL: &str = "nan";

/// What a conversion found and did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Rows in both input and output
    pub rows: usize,
    /// Source column used for the barcode
    pub barcode_column: String,
    /// Source column used for the product name, if any
    pub product_name_column: Option<String>,
    /// Source column used for the supplier stock code, if any
    pub supplier_code_column: Option<String>,
    /// Rows whose supplier stock code was taken from the barcode
    pub fallback_fills: usize,
}

/// Output table plus its report
#[derive(Debug, Clone)]
pub struct Conversion {
    pub table: Table,
    pub report: ConversionReport,
}

/// Convert with the built-in aliases and headers
pub fn transform(table: &Table) -> Result<Table> {
    transform_with(table, &ConvertConfig::default())
}

/// Convert with a custom configuration
pub fn transform_with(table: &Table, config: &ConvertConfig) -> Result<Table> {
    convert(table, config).map(|c| c.table)
}

/// Convert `table` and report which columns were used
pub fn convert(table: &Table, config: &ConvertConfig) -> Result<Conversion> {
    let index = ColumnIndex::new(table);
    let aliases = &config.aliases;

    let barcode_col = index
        .resolve(&aliases.barcode)
        .ok_or_else(|| Error::missing_column(BARCODE_FIELD))?;
    let name_col = index.resolve(&aliases.product_name);
    let supplier_col = index.resolve(&aliases.supplier_stock_code);
    debug!(
        barcode = barcode_col,
        product_name = ?name_col,
        supplier_stock_code = ?supplier_col,
        "resolved source columns"
    );

    let rows = table.row_count();
    let barcodes = text_series(table, Some(barcode_col), rows);

    let mut supplier_codes = text_series(table, supplier_col, rows);
    for code in supplier_codes.iter_mut() {
        if code.eq_ignore_ascii_case(NAN_LITERAL) {
            code.clear();
        }
    }

    let mut fallback_fills = 0;
    for (code, barcode) in supplier_codes.iter_mut().zip(&barcodes) {
        if code.is_empty() && !barcode.is_empty() {
            code.clone_from(barcode);
            fallback_fills += 1;
        }
    }

    let names = text_series(table, name_col, rows);

    let headers = config.output.headers();
    let zeros = vec![CellValue::Number(0.0); rows];
    let output = Table::from_columns(vec![
        text_column(headers[0], barcodes),
        text_column(headers[1], names),
        text_column(headers[2], supplier_codes),
        Column::new(headers[3], zeros.clone()),
        Column::new(headers[4], zeros.clone()),
        Column::new(headers[5], zeros),
    ])?;

    let report = ConversionReport {
        rows,
        barcode_column: barcode_col.to_string(),
        product_name_column: name_col.map(str::to_string),
        supplier_code_column: supplier_col.map(str::to_string),
        fallback_fills,
    };
    info!(
        rows = report.rows,
        fallback_fills = report.fallback_fills,
        "converted listing table"
    );

    Ok(Conversion {
        table: output,
        report,
    })
}

/// Trimmed string form of a resolved column, or empty strings when unresolved
fn text_series(table: &Table, column: Option<&str>, rows: usize) -> Vec<String> {
    match column.and_then(|name| table.find_column(name)) {
        Some(col) => col.trimmed_strings(),
        None => vec![String::new(); rows],
    }
}

/// Final text column; values are re-trimmed and stored as text
fn text_column(name: &str, values: Vec<String>) -> Column {
    Column::new(
        name,
        values
            .into_iter()
            .map(|v| CellValue::Text(v.trim().to_string()))
            .collect(),
    )
}
