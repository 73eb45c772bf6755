use std::sync::Arc;

use anyhow::Context as _;
use jenkins_launcher::cache::FileJobCache;
use jenkins_launcher::config::LauncherConfig;
use jenkins_launcher::error::Error;
use jenkins_launcher::jenkins::HttpJenkinsApi;
use jenkins_launcher::launcher::{self, LauncherItem};
use jenkins_launcher::query::QueryOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout is reserved for the script-filter payload; diagnostics go
    // to stderr so the launcher never parses them.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    match run().await {
        Ok(items) => {
            launcher::emit(&items, &mut stdout).context("writing launcher output")?;
        }
        Err(error) => {
            // Every failure still renders a row; the launcher shows the
            // message instead of silently coming up empty.
            tracing::error!(%error, "query failed");
            launcher::emit(&[LauncherItem::error(&error.to_string())], &mut stdout)
                .context("writing launcher error output")?;
        }
    }
    Ok(())
}

async fn run() -> Result<Vec<LauncherItem>, Error> {
    let config = LauncherConfig::from_env()?;
    tracing::debug!(
        host = %config.host,
        cache_dir = %config.cache_dir.display(),
        "configured"
    );

    let api = Arc::new(HttpJenkinsApi::new(&config));
    let cache = Arc::new(FileJobCache::new(&config.cache_dir));
    let orchestrator = QueryOrchestrator::new(api, cache, config.cache_max_age);

    let records = orchestrator.query_all().await?;
    Ok(launcher::items_for(&records, &config.resource_dir))
}
