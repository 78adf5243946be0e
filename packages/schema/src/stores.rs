//! Store-table fragments and the derived store projection.
//!
//! The import collaborator hands the core an already-parsed CSV fragment
//! (headers + rows). The core keeps the fragment verbatim on the section
//! and derives a canonical `StoreRecord` table from it: the well-known
//! columns (id / name / postal / address / prefecture) are mapped by
//! header, everything else lands in `extra`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw CSV fragment produced by the import collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Display labels for store-table columns, keyed by canonical column key
pub type StoreLabels = BTreeMap<String, String>;

/// Filters applied to the rendered store table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreFilters {
    pub prefectures: Vec<String>,
    pub search: String,
}

/// One canonical store row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreRecord {
    pub id: String,
    pub name: String,
    pub postal_code: String,
    pub address: String,
    pub prefecture: String,
    pub extra: BTreeMap<String, String>,
}

/// Canonical column keyed by recognized header spellings
fn canonical_key(header: &str) -> Option<&'static str> {
    match header.trim().to_ascii_lowercase().as_str() {
        "id" | "store_id" | "storeid" | "code" => Some("id"),
        "name" | "store" | "store_name" | "storename" => Some("name"),
        "postal" | "postal_code" | "postalcode" | "zip" | "zipcode" => Some("postal"),
        "address" | "addr" => Some("address"),
        "prefecture" | "pref" => Some("prefecture"),
        _ => None,
    }
}

/// Project a CSV fragment into canonical store records.
///
/// Rows missing an id column get a positional `store-{n}` id. Short rows
/// are padded with empty cells; surplus cells beyond the header count are
/// ignored.
pub fn project_stores(csv: &StoreCsv) -> Vec<StoreRecord> {
    let mut records = Vec::with_capacity(csv.rows.len());

    for (row_index, row) in csv.rows.iter().enumerate() {
        let mut record = StoreRecord::default();

        for (col, header) in csv.headers.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("").trim();
            match canonical_key(header) {
                Some("id") => record.id = cell.to_string(),
                Some("name") => record.name = cell.to_string(),
                Some("postal") => record.postal_code = cell.to_string(),
                Some("address") => record.address = cell.to_string(),
                Some("prefecture") => record.prefecture = cell.to_string(),
                _ => {
                    let key = header.trim();
                    if !key.is_empty() {
                        record.extra.insert(key.to_string(), cell.to_string());
                    }
                }
            }
        }

        if record.id.is_empty() {
            record.id = format!("store-{}", row_index + 1);
        }

        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(headers: &[&str], rows: &[&[&str]]) -> StoreCsv {
        StoreCsv {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_canonical_columns_mapped() {
        let records = project_stores(&csv(
            &["id", "name", "zip", "address", "pref", "hours"],
            &[&["001", "Shibuya", "150-0002", "1-2-3 Shibuya", "Tokyo", "10-19"]],
        ));

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "001");
        assert_eq!(r.name, "Shibuya");
        assert_eq!(r.postal_code, "150-0002");
        assert_eq!(r.prefecture, "Tokyo");
        assert_eq!(r.extra.get("hours").map(String::as_str), Some("10-19"));
    }

    #[test]
    fn test_missing_id_gets_positional_id() {
        let records = project_stores(&csv(
            &["name"],
            &[&["Umeda"], &["Namba"]],
        ));

        assert_eq!(records[0].id, "store-1");
        assert_eq!(records[1].id, "store-2");
    }

    #[test]
    fn test_short_rows_padded() {
        let records = project_stores(&csv(
            &["id", "name", "address"],
            &[&["001"]],
        ));

        assert_eq!(records[0].name, "");
        assert_eq!(records[0].address, "");
    }

    #[test]
    fn test_header_case_and_whitespace() {
        let records = project_stores(&csv(
            &[" Store_Name ", "POSTAL_CODE"],
            &[&["Ginza", "104-0061"]],
        ));

        assert_eq!(records[0].name, "Ginza");
        assert_eq!(records[0].postal_code, "104-0061");
    }
}
