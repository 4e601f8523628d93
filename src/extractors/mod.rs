// src/extractors/mod.rs
pub mod merge;
pub mod normalize;
pub mod table;
pub mod text;

use std::path::Path;

use crate::models::PlayerRecord;
use crate::sheet::SheetDocument;
use crate::utils::error::SheetError;

/// Parses one cheat-sheet document into player records.
///
/// Table-mode extraction runs first; if it yields nothing, the text-mode
/// fallback scans the document's full text. A document where both modes come
/// up empty returns an empty set — distinguishing "no data" from "bad input"
/// is the caller's concern.
pub fn parse_cheatsheet(path: &Path, assume_has_value: bool) -> Result<Vec<PlayerRecord>, SheetError> {
    let doc = SheetDocument::open(path)?;
    let records = extract_document(&doc, assume_has_value);
    tracing::info!(
        "Extracted {} player records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn extract_document(doc: &SheetDocument, assume_has_value: bool) -> Vec<PlayerRecord> {
    let tables = doc.tables();
    let records = table::extract(&tables, assume_has_value);
    if !records.is_empty() {
        return records;
    }
    tracing::debug!("Table extraction yielded nothing, falling back to text scan");
    text::extract(&doc.text(), assume_has_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn table_mode_wins_when_tables_yield_records() {
        let doc = SheetDocument::from_html(
            r#"<table>
              <tr><th>Rank</th><th>Player</th><th>Team</th><th>Pos</th></tr>
              <tr><td>1</td><td>Bijan Robinson</td><td>ATL</td><td>RB</td></tr>
              <tr><td>2</td><td>Ja'Marr Chase</td><td>CIN</td><td>WR</td></tr>
            </table>"#,
        );
        let records = extract_document(&doc, false);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Bijan Robinson");
        assert_eq!(records[1].position, Position::WR);
    }

    #[test]
    fn text_mode_kicks_in_when_tables_are_empty() {
        let doc = SheetDocument::from_html(
            "<html><body>\
             <p>1 Bijan Robinson ATL RB Bye 5</p>\
             <p>2 Ja'Marr Chase CIN WR Bye 10</p>\
             </body></html>",
        );
        let records = extract_document(&doc, false);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Ja'Marr Chase");
        assert_eq!(records[1].bye_week, Some(10));
    }

    #[test]
    fn both_modes_empty_returns_empty_set() {
        let doc = SheetDocument::from_html("<html><body><p>league notes</p></body></html>");
        assert!(extract_document(&doc, false).is_empty());
    }
}
