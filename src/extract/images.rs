use std::sync::LazyLock;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::titles::TitleTracker;

static WALK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2, h3, img").unwrap());

/// An `<img>` paired with its nearest preceding section heading.
/// `url` is absolute, so the chart stays loadable outside the source page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledImage {
    pub title: String,
    pub url: String,
}

/// Collect every image in document order, resolving each `src` against the
/// page URL. Images without a `src`, or whose `src` cannot be resolved, are
/// skipped; they are not errors.
pub fn extract_images(html: &str, base_url: &str, clean_titles: bool) -> Result<Vec<TitledImage>> {
    let base = Url::parse(base_url).with_context(|| format!("URL de página inválida: {base_url}"))?;
    let doc = Html::parse_document(html);
    let mut tracker = TitleTracker::new(clean_titles);
    let mut images = Vec::new();

    for el in doc.select(&WALK) {
        match el.value().name() {
            "img" => {
                let Some(src) = el.value().attr("src") else {
                    continue;
                };
                match base.join(src) {
                    Ok(absolute) => images.push(TitledImage {
                        title: tracker.image_title(),
                        url: absolute.to_string(),
                    }),
                    Err(e) => debug!("Ignoring unresolvable img src {:?}: {}", src, e),
                }
            }
            _ => tracker.observe(el),
        }
    }

    Ok(images)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::titles::UNTITLED_IMAGE;

    const BASE: &str = "https://example.test/chapter";

    #[test]
    fn relative_src_resolves_against_base() {
        let images = extract_images("<img src=\"img/chart1.png\">", BASE, false).unwrap();
        assert_eq!(images[0].url, "https://example.test/img/chart1.png");
    }

    #[test]
    fn absolute_src_is_unchanged() {
        let html = "<img src=\"https://cdn.example.test/c.png\">";
        let images = extract_images(html, BASE, false).unwrap();
        assert_eq!(images[0].url, "https://cdn.example.test/c.png");
    }

    #[test]
    fn srcless_images_are_skipped() {
        let html = "<img alt=\"decorativa\"><img src=\"a.png\">";
        let images = extract_images(html, BASE, false).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "https://example.test/a.png");
    }

    #[test]
    fn titles_follow_preceding_headings() {
        let html = "<h2>Geral</h2><img src=\"a.png\"><h3>Evolução</h3><img src=\"b.png\">";
        let images = extract_images(html, BASE, false).unwrap();
        assert_eq!(images[0].title, "Geral");
        assert_eq!(images[1].title, "Evolução");
    }

    #[test]
    fn untitled_image_gets_placeholder() {
        let images = extract_images("<img src=\"a.png\">", BASE, false).unwrap();
        assert_eq!(images[0].title, UNTITLED_IMAGE);
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(extract_images("<img src=\"a.png\">", "not a url", false).is_err());
    }
}
