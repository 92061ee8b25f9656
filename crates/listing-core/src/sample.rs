//! A small source-marketplace export for trying the converter

use crate::table::{CellValue, Column, Table};

/// Header row of the sample export, in source order
pub const SAMPLE_COLUMNS: [&str; 15] = [
    "Barkod",
    "Model Kodu",
    "Ürün Rengi",
    "Beden",
    "Boyut/Ebat",
    "Cinsiyet",
    "Marka",
    "Kategori İsmi",
    "Tedarikçi Stok Kodu",
    "Ürün Adı",
    "Ürün Açıklaması",
    "KDV Oranı",
    "Desi",
    "Görsel 1",
    "Sevkiyat Süresi",
];

/// Three rows; the supplier stock code is missing, set, and blank in turn
pub fn sample_table() -> Table {
    let rows: [[CellValue; 15]; 3] = [
        sample_row(
            ["111", "M1", "Kırmızı", "L", "M", "Erkek", "MarkaA", "KategoriA"],
            None,
            ["Ürün A", "Açıklama"],
            18.0,
            1.0,
            ["img1.jpg", "3 gün"],
        ),
        sample_row(
            ["222", "M2", "Mavi", "M", "M", "Kadın", "MarkaB", "KategoriB"],
            Some("ABC-222"),
            ["Ürün B", "Açıklama B"],
            8.0,
            1.2,
            ["img2.jpg", "2 gün"],
        ),
        sample_row(
            ["333", "M3", "Siyah", "S", "S", "Unisex", "MarkaC", "KategoriC"],
            Some(""),
            ["Ürün C", ""],
            1.0,
            0.5,
            ["img3.jpg", "1 gün"],
        ),
    ];

    let columns = SAMPLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(*name, rows.iter().map(|r| r[i].clone()).collect()))
        .collect();

    Table { columns }
}

fn sample_row(
    head: [&str; 8],
    supplier_code: Option<&str>,
    name_and_description: [&str; 2],
    vat: f64,
    desi: f64,
    tail: [&str; 2],
) -> [CellValue; 15] {
    let t = CellValue::from_text;
    [
        t(head[0]),
        t(head[1]),
        t(head[2]),
        t(head[3]),
        t(head[4]),
        t(head[5]),
        t(head[6]),
        t(head[7]),
        match supplier_code {
            Some(code) => CellValue::Text(code.to_string()),
            None => CellValue::Missing,
        },
        t(name_and_description[0]),
        t(name_and_description[1]),
        CellValue::Number(vat),
        CellValue::Number(desi),
        t(tail[0]),
        t(tail[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transform;

    #[test]
    fn test_sample_shape() {
        let table = sample_table();
        assert_eq!(table.column_count(), 15);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names(), SAMPLE_COLUMNS.to_vec());
    }

    #[test]
    fn test_sample_converts_with_fallback() {
        let output = transform(&sample_table()).unwrap();

        assert_eq!(output.row_count(), 3);
        assert_eq!(
            output.column(2).unwrap().trimmed_strings(),
            vec!["111", "ABC-222", "333"]
        );
        assert_eq!(
            output.column(1).unwrap().trimmed_strings(),
            vec!["Ürün A", "Ürün B", "Ürün C"]
        );
    }
}
