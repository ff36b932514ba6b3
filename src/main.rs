use std::path::PathBuf;

use clap::{Parser, Subcommand};

use anuario::catalog::Catalog;
use anuario::extract::{self, TitledImage, TitledTable};
use anuario::fetch;
use anuario::search::{self, RowMatch, SearchMatchRecord};

#[derive(Parser)]
#[command(name = "anuario", about = "Viewer for the UnB statistical yearbook")]
struct Cli {
    /// JSON file replacing the built-in year/chapter catalog
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available yearbook editions
    Years,
    /// List the chapters of one edition
    Chapters {
        /// Edition year (e.g. "2022")
        #[arg(short, long)]
        year: String,
    },
    /// Fetch a chapter and show its data tables
    Tables {
        #[arg(short, long)]
        year: String,
        /// Chapter label or its number (e.g. "3. Graduação" or "3")
        #[arg(short, long)]
        chapter: String,
        /// Show only rows containing this term (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Strip the "<n>. " numbering prefix from section titles
        #[arg(long)]
        clean_titles: bool,
        /// Print the original table markup instead of a title listing
        #[arg(long)]
        raw: bool,
        /// Emit JSON records instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch a chapter and show its charts
    Charts {
        #[arg(short, long)]
        year: String,
        /// Chapter label or its number (e.g. "3. Graduação" or "3")
        #[arg(short, long)]
        chapter: String,
        /// Strip the "<n>. " numbering prefix from section titles
        #[arg(long)]
        clean_titles: bool,
        /// Emit JSON records instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };

    match cli.command {
        Commands::Years => {
            for year in catalog.years() {
                println!("{year}");
            }
            Ok(())
        }
        Commands::Chapters { year } => {
            for chapter in catalog.chapters(&year)? {
                println!("{:<58} {}", truncate(&chapter.label, 58), chapter.url);
            }
            Ok(())
        }
        Commands::Tables {
            year,
            chapter,
            search,
            clean_titles,
            raw,
            json,
        } => {
            let chapter = catalog.chapter(&year, &chapter)?;
            let html = fetch::fetch_page(&chapter.url).await?;
            let tables = extract::extract_tables(&html, clean_titles);

            // An empty term means no filtering was requested at all.
            match search.as_deref().filter(|t| !t.is_empty()) {
                Some(term) => {
                    let records = search::search_tables(&tables, term);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    } else {
                        render_matches(&records);
                    }
                }
                None => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&tables)?);
                    } else {
                        render_tables(&tables, raw);
                    }
                }
            }
            Ok(())
        }
        Commands::Charts {
            year,
            chapter,
            clean_titles,
            json,
        } => {
            let chapter = catalog.chapter(&year, &chapter)?;
            let html = fetch::fetch_page(&chapter.url).await?;
            let images = extract::extract_images(&html, &chapter.url, clean_titles)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else {
                render_images(&images);
            }
            Ok(())
        }
    }
}

fn render_tables(tables: &[TitledTable], raw: bool) {
    if tables.is_empty() {
        println!("Nenhuma tabela encontrada.");
        return;
    }
    for (i, table) in tables.iter().enumerate() {
        println!("{:>3}. {}", i + 1, table.title);
        if raw {
            println!("{}\n", table.html);
        }
    }
}

fn render_matches(records: &[SearchMatchRecord]) {
    if records.is_empty() {
        println!("Nenhum resultado encontrado para a pesquisa.");
        return;
    }
    for record in records {
        println!("### {}", record.title);
        for row in &record.matches {
            println!("- {}", format_row(row));
        }
        println!();
    }
}

fn format_row(row: &RowMatch) -> String {
    match row {
        RowMatch::Labeled(pairs) => pairs
            .iter()
            .map(|(header, value)| format!("{header}: {value}"))
            .collect::<Vec<_>>()
            .join(" | "),
        RowMatch::Positional(values) => values.join(" | "),
    }
}

fn render_images(images: &[TitledImage]) {
    if images.is_empty() {
        println!("Nenhum gráfico encontrado.");
        return;
    }
    for (i, image) in images.iter().enumerate() {
        println!("{:>3}. {}", i + 1, image.title);
        println!("     {}", image.url);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
