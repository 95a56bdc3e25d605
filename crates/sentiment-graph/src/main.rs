use anyhow::{Context, Result};
use sentigraph_core::archive::PostArchive;
use sentigraph_core::config::Config;
use sentigraph_core::console;
use sentigraph_core::pipeline::Analyzer;
use sentigraph_core::render;
use sentigraph_core::report::sentiment_report;
use sentigraph_core::source::{FilePostSource, PostSource};
use sentigraph_core::{LexiconClassifier, SentimentClassifier};
use std::env;
use tokio::io::{stdin, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run_topic<S: PostSource, C: SentimentClassifier>(
    analyzer: &mut Analyzer<S, C>,
    config: &Config,
    topic: &str,
) -> Result<()> {
    let analysis = analyzer.analyze(topic, config.limit)?;
    println!("{}", sentiment_report(&analysis.topic, &analysis.posts));

    render::write_html(&analysis.export, &analysis.topic, &config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!(path = %config.output_path.display(), "graph written");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?.apply_args(env::args().skip(1))?;

    let source = FilePostSource::open(&config.posts_path)
        .with_context(|| format!("Failed to load posts from {}", config.posts_path.display()))?;
    let archive = PostArchive::open(&config.archive_path)?;
    let mut analyzer = Analyzer::new(source, LexiconClassifier::new()).with_archive(archive);

    if let Some(topic) = config.topic.clone() {
        return run_topic(&mut analyzer, &config, &topic);
    }

    console::read_topics(BufReader::new(stdin()), std::io::stdout(), |topic| {
        if let Err(e) = run_topic(&mut analyzer, &config, topic) {
            error!("{:#}", e);
        }
    })
    .await?;

    println!("\nGoodbye!");
    Ok(())
}
