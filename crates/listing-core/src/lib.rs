//! listing-core: Core library for converting marketplace listing exports
//!
//! This library provides functionality to:
//! - Read CSV files and spreadsheets into in-memory tables
//! - Locate source columns under inconsistent naming (case, accents, whitespace)
//! - Transform a source export into the fixed six-column target schema
//! - Export the result as xlsx, CSV or JSON

pub mod config;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod resolver;
pub mod sample;
pub mod table;
pub mod transform;
pub mod writer;

pub use config::{ConvertConfig, FieldAliases, OutputColumns};
pub use error::{Error, Result};
pub use normalize::{normalize_cell, normalize_name};
pub use reader::{parse_csv_str, read_csv, read_table, read_workbook};
pub use resolver::{find_column, ColumnIndex, ColumnMatch};
pub use sample::sample_table;
pub use table::{CellValue, Column, Table};
pub use transform::{convert, transform, transform_with, Conversion, ConversionReport};
pub use writer::{
    default_output_path, export, to_csv_string, to_json, write_csv, write_xlsx, ExportFormat,
};
