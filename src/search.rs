use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::extract::titles::element_text;
use crate::extract::TitledTable;

static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Key used for rows of tables without a header row.
pub const VALUES_KEY: &str = "Valores";

/// One matching row. Tables with header cells produce column-ordered
/// header→value pairs; headerless tables keep the plain cell list.
#[derive(Debug, Clone, PartialEq)]
pub enum RowMatch {
    Labeled(Vec<(String, String)>),
    Positional(Vec<String>),
}

/// All matching rows of one table, in row document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatchRecord {
    pub title: String,
    pub matches: Vec<RowMatch>,
}

// Both variants serialize as a JSON object so `--json` output is uniform:
// labeled rows as {header: value, ...} in column order, positional rows as
// {"Valores": [...]}.
impl Serialize for RowMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowMatch::Labeled(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (header, value) in pairs {
                    map.serialize_entry(header, value)?;
                }
                map.end()
            }
            RowMatch::Positional(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(VALUES_KEY, values)?;
                map.end()
            }
        }
    }
}

/// Filter table rows by a case-insensitive term.
///
/// Re-parses each table's serialized markup, matches the term as a substring
/// of each row's space-joined `td` texts, and returns one record per table
/// with at least one matching row, in input table order. Tables without
/// matches are omitted.
///
/// Precondition: `term` is non-empty. An empty term means the caller wants
/// no filtering at all and must skip this stage.
pub fn search_tables(tables: &[TitledTable], term: &str) -> Vec<SearchMatchRecord> {
    let needle = term.to_lowercase();
    let mut records = Vec::new();

    for table in tables {
        let fragment = Html::parse_fragment(&table.html);
        let headers: Vec<String> = fragment.select(&TH).map(element_text).collect();

        let mut matches = Vec::new();
        for row in fragment.select(&TR) {
            let cells: Vec<String> = row.select(&TD).map(element_text).collect();
            if cells.is_empty() {
                // header-only row, nothing to match against
                continue;
            }
            if !cells.join(" ").to_lowercase().contains(&needle) {
                continue;
            }
            matches.push(if headers.is_empty() {
                RowMatch::Positional(cells)
            } else {
                RowMatch::Labeled(zip_headers(&headers, cells))
            });
        }

        if !matches.is_empty() {
            records.push(SearchMatchRecord {
                title: table.title.clone(),
                matches,
            });
        }
    }

    records
}

/// Pair headers with cells by position, truncating at the shorter sequence.
/// A repeated header label keeps its first position but takes the last value.
fn zip_headers(headers: &[String], cells: Vec<String>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (header, cell) in headers.iter().zip(cells) {
        if let Some(existing) = pairs.iter_mut().find(|(h, _)| h == header) {
            existing.1 = cell;
        } else {
            pairs.push((header.clone(), cell));
        }
    }
    pairs
}

// ── Tests ──
