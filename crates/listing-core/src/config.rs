//! Conversion configuration: alias lists and output headers
//!
//! Everything has a built-in default matching the Trendyol → İdefix
//! conversion. A TOML file may override any subset of keys:
//!
//! ```toml
//! sheet_name = "Export"
//!
//! [aliases]
//! barcode = ["Barkod", "EAN"]
//!
//! [output]
//! barcode = "Barcode"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Known spellings of each logical source field, in preference order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub barcode: Vec<String>,
    pub product_name: Vec<String>,
    pub supplier_stock_code: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            barcode: strings(&["Barkod", "barcode", "barkod"]),
            product_name: strings(&[
                "Ürün Adı",
                "Urun Adı",
                "Ürün adı",
                "urun adı",
                "product name",
                "ürün adı",
            ]),
            supplier_stock_code: strings(&[
                "Tedarikçi Stok Kodu",
                "Tedarikci Stok Kodu",
                "Satıcı Stok Kodu",
                "Satici Stok Kodu",
                "supplier stock code",
            ]),
        }
    }
}

/// Header names of the six output columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputColumns {
    pub barcode: String,
    pub product_name: String,
    pub supplier_stock_code: String,
    pub channel_a_price: String,
    pub channel_b_price: String,
    pub stock_quantity: String,
}

impl OutputColumns {
    /// Headers in output order
    pub fn headers(&self) -> [&str; 6] {
        [
            self.barcode.as_str(),
            self.product_name.as_str(),
            self.supplier_stock_code.as_str(),
            self.channel_a_price.as_str(),
            self.channel_b_price.as_str(),
            self.stock_quantity.as_str(),
        ]
    }
}

impl Default for OutputColumns {
    fn default() -> Self {
        Self {
            barcode: "Barkod".to_string(),
            product_name: "Ürün Adı".to_string(),
            supplier_stock_code: "Satıcı Stok Kodu".to_string(),
            channel_a_price: "İdefix Satış Fiyatı".to_string(),
            channel_b_price: "Piyasa Satış Fiyatı".to_string(),
            stock_quantity: "Ürün Stok Adedi".to_string(),
        }
    }
}

/// Full conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Source-side alias lists
    pub aliases: FieldAliases,
    /// Target-side header names
    pub output: OutputColumns,
    /// Sheet name used when a writer supports named sheets
    pub sheet_name: String,
    /// Inserted into default output file names
    pub file_suffix: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            aliases: FieldAliases::default(),
            output: OutputColumns::default(),
            sheet_name: "İdefix Format".to_string(),
            file_suffix: "dönüşmüş".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Load a TOML config file; omitted keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ConvertConfig = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject configurations the transformer can't work with
    pub fn validate(&self) -> Result<()> {
        let lists = [
            ("barcode", &self.aliases.barcode),
            ("product_name", &self.aliases.product_name),
            ("supplier_stock_code", &self.aliases.supplier_stock_code),
        ];
        for (field, list) in lists {
            if list.iter().all(|a| a.trim().is_empty()) {
                return Err(Error::InvalidConfig(format!("alias list '{}' is empty", field)));
            }
        }

        let mut seen = HashSet::new();
        for header in self.output.headers() {
            if header.trim().is_empty() {
                return Err(Error::InvalidConfig("output header is empty".to_string()));
            }
            if !seen.insert(header) {
                return Err(Error::InvalidConfig(format!("duplicate output header '{}'", header)));
            }
        }
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
