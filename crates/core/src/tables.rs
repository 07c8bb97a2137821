//! Display-table reshaping
//!
//! Tables arrive either pre-shaped or as a flat cell sequence. A flat body
//! is cut into rows of header width; with a zero-width header every cell
//! becomes its own single-cell row.

use promoboard_domain::{DisplayTable, TableBody};

/// Produce the renderable rows of a display table.
pub fn table_rows(table: &DisplayTable) -> Vec<Vec<String>> {
    match &table.body {
        TableBody::Rows(rows) => rows.clone(),
        TableBody::Flat(cells) => {
            let width = table.column_count();
            if width == 0 {
                cells.iter().map(|cell| vec![cell.clone()]).collect()
            } else {
                cells.chunks(width).map(<[String]>::to_vec).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], body: TableBody) -> DisplayTable {
        DisplayTable {
            id: "t".to_string(),
            title: "Mechanics".to_string(),
            header: header.iter().map(|h| (*h).to_string()).collect(),
            body,
        }
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn flat_body_reshapes_to_header_width() {
        let table = table(
            &["Week", "Offer", "Channel"],
            TableBody::Flat(cells(&["1", "a", "x", "2", "b", "y", "3", "c", "z"])),
        );

        let rows = table_rows(&table);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], cells(&["1", "a", "x"]));
        assert_eq!(rows[2], cells(&["3", "c", "z"]));
    }

    #[test]
    fn zero_width_header_yields_single_cell_rows() {
        let table = table(&[], TableBody::Flat(cells(&["only", "these"])));

        let rows = table_rows(&table);
        assert_eq!(rows, vec![cells(&["only"]), cells(&["these"])]);
    }

    #[test]
    fn pre_shaped_rows_pass_through_untouched() {
        let shaped = vec![cells(&["1", "a"]), cells(&["2"])];
        let table = table(&["Week", "Offer"], TableBody::Rows(shaped.clone()));

        assert_eq!(table_rows(&table), shaped);
    }

    #[test]
    fn ragged_tail_keeps_remaining_cells() {
        let table = table(&["A", "B"], TableBody::Flat(cells(&["1", "2", "3"])));

        let rows = table_rows(&table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], cells(&["3"]));
    }

    #[test]
    fn empty_flat_body_yields_no_rows() {
        let table = table(&["A"], TableBody::Flat(Vec::new()));
        assert!(table_rows(&table).is_empty());
    }
}
