use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Fallback title for a table with no preceding h2/h3.
pub const UNTITLED_TABLE: &str = "Título desconhecido";
/// Fallback title for an image with no preceding h2/h3.
pub const UNTITLED_IMAGE: &str = "Gráfico sem título";

/// Strip leading chapter-number prefixes ("3. Graduação" → "Graduação").
/// Strips until no prefix remains, so the transform is idempotent even on
/// stacked prefixes; strings without a prefix pass through unchanged.
pub fn clean_title(title: &str) -> String {
    let mut text = title;
    while let Some(m) = NUMBER_PREFIX_RE.find(text) {
        text = &text[m.end()..];
    }
    text.to_string()
}

/// Element text with runs of whitespace collapsed to single spaces.
pub fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves section titles during a single forward walk over the document.
///
/// Feeding every h2/h3 to [`observe`](Self::observe) in document order makes
/// the last-seen headings exactly the "nearest preceding" ones for whatever
/// element the walk is currently at. An h3 seen anywhere before the element
/// wins over an h2, even a closer one.
pub struct TitleTracker {
    clean: bool,
    last_h2: Option<String>,
    last_h3: Option<String>,
}

impl TitleTracker {
    pub fn new(clean: bool) -> Self {
        TitleTracker {
            clean,
            last_h2: None,
            last_h3: None,
        }
    }

    /// Record a heading element. Non-heading elements are ignored.
    pub fn observe(&mut self, el: ElementRef) {
        match el.value().name() {
            "h2" => self.last_h2 = Some(element_text(el)),
            "h3" => self.last_h3 = Some(element_text(el)),
            _ => {}
        }
    }

    /// Title for a table at the current walk position.
    pub fn table_title(&self) -> String {
        self.resolve(UNTITLED_TABLE)
    }

    /// Title for an image at the current walk position.
    pub fn image_title(&self) -> String {
        self.resolve(UNTITLED_IMAGE)
    }

    fn resolve(&self, fallback: &str) -> String {
        match self.last_h3.as_deref().or(self.last_h2.as_deref()) {
            Some(text) if self.clean => clean_title(text),
            Some(text) => text.to_string(),
            None => fallback.to_string(),
        }
    }
}

// ── Tests ──
