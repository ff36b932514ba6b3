use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use super::titles::TitleTracker;

static WALK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2, h3, table").unwrap());

/// A `<table>` paired with its nearest preceding section heading.
/// `html` is the original markup, serialized verbatim so the table can be
/// rendered exactly as published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledTable {
    pub title: String,
    pub html: String,
}

/// Collect every table in document order, each with its resolved title.
/// A document without tables yields an empty vec.
pub fn extract_tables(html: &str, clean_titles: bool) -> Vec<TitledTable> {
    let doc = Html::parse_document(html);
    let mut tracker = TitleTracker::new(clean_titles);
    let mut tables = Vec::new();

    for el in doc.select(&WALK) {
        match el.value().name() {
            "table" => tables.push(TitledTable {
                title: tracker.table_title(),
                html: el.html(),
            }),
            _ => tracker.observe(el),
        }
    }

    tables
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::titles::UNTITLED_TABLE;

    #[test]
    fn preserves_document_order() {
        let html = "\
            <h2>Geral</h2><table id=\"a\"></table>\
            <h2>Graduação</h2><table id=\"b\"></table>\
            <h2>Extensão</h2><table id=\"c\"></table>";
        let tables = extract_tables(html, false);
        let titles: Vec<&str> = tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Geral", "Graduação", "Extensão"]);
        assert!(tables[0].html.contains("id=\"a\""));
        assert!(tables[2].html.contains("id=\"c\""));
    }

    #[test]
    fn untitled_table_gets_placeholder() {
        let tables = extract_tables("<p>intro</p><table></table>", false);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, UNTITLED_TABLE);
    }

    #[test]
    fn earlier_h3_beats_nearer_h2() {
        let html = "<h3>Oferta de Vagas</h3><h2>Capítulo</h2><table></table>";
        let tables = extract_tables(html, false);
        assert_eq!(tables[0].title, "Oferta de Vagas");
    }

    #[test]
    fn markup_is_kept_verbatim() {
        let html = "<h2>Geral</h2>\
            <table class=\"dados\"><tr><th>Curso</th></tr><tr><td><b>Direito</b></td></tr></table>";
        let tables = extract_tables(html, false);
        assert!(tables[0].html.starts_with("<table class=\"dados\">"));
        assert!(tables[0].html.contains("<b>Direito</b>"));
    }

    #[test]
    fn no_tables_yields_empty() {
        assert!(extract_tables("<h2>Geral</h2><p>só texto</p>", false).is_empty());
    }

    #[test]
    fn title_cleaning_applies_when_enabled() {
        let html = "<h2>3. Graduação</h2><table></table>";
        assert_eq!(extract_tables(html, true)[0].title, "Graduação");
        assert_eq!(extract_tables(html, false)[0].title, "3. Graduação");
    }
}
