//! Display tables
//!
//! A display table is a named, reusable tabular content block referenced by
//! id from one or more promotions. The store delivers the body either as
//! pre-shaped rows or as a flat cell sequence that needs reshaping against
//! the header width.

use serde::{Deserialize, Serialize};

/// Table body as stored: explicit rows, or a flat cell sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableBody {
    Rows(Vec<Vec<String>>),
    Flat(Vec<String>),
}

impl Default for TableBody {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

/// A reusable tabular content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayTable {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub body: TableBody,
}

impl DisplayTable {
    /// Column count implied by the header row
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_body_deserializes() {
        let table: DisplayTable = serde_json::from_str(
            r#"{"id": "t1", "title": "Mechanics", "header": ["Week", "Offer"], "body": ["1", "2-for-1", "2", "free gift"]}"#,
        )
        .unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.body, TableBody::Flat(vec![
            "1".to_string(),
            "2-for-1".to_string(),
            "2".to_string(),
            "free gift".to_string(),
        ]));
    }

    #[test]
    fn shaped_body_deserializes() {
        let table: DisplayTable = serde_json::from_str(
            r#"{"id": "t2", "header": ["A"], "body": [["x"], ["y"]]}"#,
        )
        .unwrap();
        assert!(matches!(table.body, TableBody::Rows(ref rows) if rows.len() == 2));
    }
}
