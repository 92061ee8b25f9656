//! Name normalization used as the comparison key for column matching

use crate::table::CellValue;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of a header or alias
///
/// Lowercases, decomposes (NFKD), drops combining marks and trims. The result
/// is only ever compared, never displayed. Lowercasing runs again after the
/// decomposition because compatibility mappings can produce capitals
/// (`ℌ` → `H`), which keeps the function idempotent.
pub fn normalize_name(s: &str) -> String {
    let stripped: String = s
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(|&ch| canonical_combining_class(ch) == 0)
        .collect();
    stripped.to_lowercase().trim().to_string()
}

/// Normalize a cell; anything that is not text yields an empty key
pub fn normalize_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) => normalize_name(s),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_turkish_headers() {
        assert_eq!(normalize_name("Ürün Adı"), "urun adı");
        assert_eq!(normalize_name("  BARKOD "), "barkod");
        assert_eq!(normalize_name("Tedarikçi Stok Kodu"), "tedarikci stok kodu");
        // dotted capital I lowercases to i + combining dot
        assert_eq!(normalize_name("İdefix"), "idefix");
    }

    #[test]
    fn test_dotless_i_is_not_folded() {
        // ı has no decomposition, so both spellings need their own alias
        assert_ne!(normalize_name("Satıcı Stok Kodu"), normalize_name("Satici Stok Kodu"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Ürün Adı",
            " Satıcı Stok Kodu ",
            "İdefix Satış Fiyatı",
            "ℌello",
            "Ａｂｃ",
            "é\u{0301}",
            "\u{00A8}x",
            "",
        ];
        for input in inputs {
            let once = normalize_name(input);
            assert_eq!(normalize_name(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_normalize_cell_non_text() {
        assert_eq!(normalize_cell(&CellValue::Number(42.0)), "");
        assert_eq!(normalize_cell(&CellValue::Missing), "");
        assert_eq!(normalize_cell(&CellValue::Other("TRUE".to_string())), "");
        assert_eq!(normalize_cell(&CellValue::Text(" Barkod".to_string())), "barkod");
    }
}
