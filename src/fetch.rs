use anyhow::{Context, Result};
use tracing::{debug, info};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Fetch a chapter page and return its raw HTML.
///
/// Any failure to obtain the document (network error, non-success status)
/// is a hard error naming the URL; there are no retries and no caching.
pub async fn fetch_page(url: &str) -> Result<String> {
    info!("Fetching {}", url);
    fetch_inner(url)
        .await
        .with_context(|| format!("Erro ao carregar a URL {url}"))
}

async fn fetch_inner(url: &str) -> Result<String> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
