use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

// Chapter labels are shared by every published edition; only the site base
// differs per year.
const CHAPTERS: &[(&str, &str)] = &[
    ("2. Geral", "geral"),
    ("3. Graduação", "grad"),
    ("4. Pós-Graduação", "pos"),
    ("5. Mestrado", "mest"),
    ("6. Doutorado", "dout"),
    ("7. Produção Intelectual e Pesquisa", "pip"),
    ("8. Extensão", "ext"),
    ("9. Recursos Humanos", "rh"),
    ("10. Atividades Comunitárias", "comu"),
    (
        "11. Órgãos Complementares, Centros, Assessorias, Secretarias e Unidades Auxiliares",
        "org",
    ),
    ("12. Planejamento, Execução Orçamentária e Convênios", "dpo"),
];

const EDITIONS: &[(&str, &str)] = &[
    ("2020", "https://anuario-estatistico-unb-2020.netlify.app"),
    ("2021", "https://anuario2021.netlify.app"),
    ("2022", "https://anuario2022.netlify.app"),
    ("2023", "https://anuario2023.netlify.app"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edition {
    pub year: String,
    pub chapters: Vec<Chapter>,
}

/// Static year → chapter → URL registry. Built once at startup and never
/// mutated; selection is a pure lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub editions: Vec<Edition>,
}

impl Catalog {
    /// The registry of published editions, enumerated in full.
    pub fn builtin() -> Catalog {
        let editions = EDITIONS
            .iter()
            .map(|(year, base)| Edition {
                year: year.to_string(),
                chapters: CHAPTERS
                    .iter()
                    .map(|(label, slug)| Chapter {
                        label: label.to_string(),
                        url: format!("{base}/{slug}"),
                    })
                    .collect(),
            })
            .collect();
        Catalog { editions }
    }

    /// Load a replacement catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Catalog> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog file {}", path.display()))?;
        Ok(catalog)
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.editions.iter().map(|e| e.year.as_str())
    }

    pub fn chapters(&self, year: &str) -> Result<&[Chapter]> {
        match self.editions.iter().find(|e| e.year == year) {
            Some(edition) => Ok(&edition.chapters),
            None => bail!("Ano desconhecido: {year}"),
        }
    }

    /// Find a chapter by its full label or by its numeric prefix
    /// ("3. Graduação" and "3" both select the graduation chapter).
    pub fn chapter(&self, year: &str, selector: &str) -> Result<&Chapter> {
        let chapters = self.chapters(year)?;
        let found = chapters.iter().find(|c| {
            c.label == selector
                || c.label
                    .strip_prefix(selector)
                    .is_some_and(|rest| rest.starts_with('.'))
        });
        match found {
            Some(chapter) => Ok(chapter),
            None => bail!("Capítulo desconhecido em {year}: {selector}"),
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_all_years_in_order() {
        let catalog = Catalog::builtin();
        let years: Vec<&str> = catalog.years().collect();
        assert_eq!(years, ["2020", "2021", "2022", "2023"]);
    }

    #[test]
    fn chapters_keep_publication_order() {
        let catalog = Catalog::builtin();
        let chapters = catalog.chapters("2021").unwrap();
        assert_eq!(chapters.len(), 11);
        assert_eq!(chapters[0].label, "2. Geral");
        assert_eq!(chapters[10].label, "12. Planejamento, Execução Orçamentária e Convênios");
    }

    #[test]
    fn lookup_by_full_label() {
        let catalog = Catalog::builtin();
        let chapter = catalog.chapter("2020", "3. Graduação").unwrap();
        assert_eq!(chapter.url, "https://anuario-estatistico-unb-2020.netlify.app/grad");
    }

    #[test]
    fn lookup_by_numeric_prefix() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.chapter("2023", "3").unwrap().url,
            "https://anuario2023.netlify.app/grad"
        );
        assert_eq!(
            catalog.chapter("2023", "10").unwrap().url,
            "https://anuario2023.netlify.app/comu"
        );
    }

    #[test]
    fn prefix_must_match_whole_number() {
        // "1" must not select chapters 10, 11 or 12
        let catalog = Catalog::builtin();
        assert!(catalog.chapter("2022", "1").is_err());
    }

    #[test]
    fn unknown_year_and_chapter_are_errors() {
        let catalog = Catalog::builtin();
        assert!(catalog.chapters("1999").is_err());
        assert!(catalog.chapter("2020", "99").is_err());
    }
}
