use anyhow::{Context, Result};
use clap::Parser;
use pipeline::{config, AppConfig, ArtifactWriter, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Tag the named entities of web pages and draw a relation diagram per page.
#[derive(Parser, Debug)]
#[command(name = "entity-tagger", version)]
struct Cli {
    /// URLs to process, in order
    urls: Vec<String>,

    /// File with one URL per line, appended after URLS
    #[arg(long)]
    urls_file: Option<PathBuf>,

    /// Directory for mermaid_N.md and tags.csv
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// JSON config file overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let app_config = AppConfig::load(cli.config.as_deref())?;
    let llm_config = config::llm_config_from_env(&app_config.llm)?;

    let mut urls = cli.urls.clone();
    if let Some(path) = &cli.urls_file {
        let listed = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list: {:?}", path))?;
        urls.extend(config::parse_url_list(&listed));
    }
    if urls.is_empty() {
        anyhow::bail!("No URLs given; pass them as arguments or with --urls-file");
    }

    let writer = ArtifactWriter::new(&cli.output_dir)?;
    let mut pipeline = Pipeline::from_config(&app_config, &llm_config)?;

    tracing::info!(
        urls = urls.len(),
        output_dir = %writer.out_dir().display(),
        model = %llm_config.model,
        "Starting run"
    );
    let stats = pipeline.run(&urls, &writer).await?;

    println!(
        "Processed {} URLs ({} ok, {} failed); {} tags written to {}",
        stats.urls_processed,
        stats.succeeded,
        stats.failed(),
        stats.rows_written,
        writer.out_dir().display()
    );

    Ok(())
}
