// src/sheet/mod.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

use crate::utils::error::SheetError;

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("Failed to compile TABLE_SELECTOR"));

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("Failed to compile CELL_SELECTOR"));

/// One cheat-sheet document, parsed once and queried for its grid tables and
/// its raw text. The sheet family this tool is tuned for is HTML exports of
/// ESPN-style ranking sheets.
pub struct SheetDocument {
    html: Html,
}

impl SheetDocument {
    /// Reads and parses a sheet document. An unreadable or undecodable file
    /// is the one hard failure of the ingestion layer; everything downstream
    /// degrades to empty results instead of erroring.
    pub fn open(path: &Path) -> Result<Self, SheetError> {
        let raw = fs::read_to_string(path).map_err(|source| SheetError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Read sheet document {} ({} bytes)", path.display(), raw.len());
        Ok(Self::from_html(&raw))
    }

    pub fn from_html(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// Every `<table>` in the document as rows of cleaned cell strings. A
    /// document without tables yields an empty vec, never an error.
    pub fn tables(&self) -> Vec<Vec<Vec<String>>> {
        let mut tables = Vec::new();
        for table in self.html.select(&TABLE_SELECTOR) {
            let mut rows = Vec::new();
            for row in table.select(&ROW_SELECTOR) {
                let cells: Vec<String> = row
                    .select(&CELL_SELECTOR)
                    .map(|cell| clean_cell(&cell.text().collect::<String>()))
                    .collect();
                if !cells.is_empty() {
                    rows.push(cells);
                }
            }
            if !rows.is_empty() {
                tables.push(rows);
            }
        }
        tracing::debug!("Segmented {} grid tables from document", tables.len());
        tables
    }

    /// The document's full visible text as trimmed non-empty lines, one per
    /// text node. This is the input to the text-mode fallback.
    pub fn text(&self) -> String {
        self.html
            .root_element()
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn clean_cell(raw: &str) -> String {
    raw.trim().replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_segmented_into_cleaned_cells() {
        let doc = SheetDocument::from_html(
            r#"<html><body>
            <table>
              <tr><th>Rank</th><th>Player</th><th>Team</th></tr>
              <tr><td>1</td><td> Bijan
Robinson </td><td>ATL</td></tr>
            </table>
            </body></html>"#,
        );
        let tables = doc.tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[0][1], vec!["1", "Bijan Robinson", "ATL"]);
    }

    #[test]
    fn document_without_tables_yields_empty_vec() {
        let doc = SheetDocument::from_html("<html><body><p>hello</p></body></html>");
        assert!(doc.tables().is_empty());
    }

    #[test]
    fn text_returns_trimmed_non_empty_lines() {
        let doc = SheetDocument::from_html(
            "<html><body><p> 1 Bijan Robinson ATL RB </p><p></p><div>Ja'Marr Chase CIN WR</div></body></html>",
        );
        let text = doc.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["1 Bijan Robinson ATL RB", "Ja'Marr Chase CIN WR"]);
    }

    #[test]
    fn open_fails_for_missing_file() {
        let err = SheetDocument::open(Path::new("/nonexistent/sheet.html"));
        assert!(err.is_err());
    }
}
