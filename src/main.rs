//! wotc-bot - World of Tanks Console statistics bot for Reddit.

mod cli;

use std::sync::Arc;

use cli::Cli;
use tracing::info;
use wotc_bot::bot::Bot;
use wotc_bot::config::Config;
use wotc_bot::error::Result;
use wotc_bot::logging::{self, LogGuard};
use wotc_bot::provider::ReqwestFetcher;
use wotc_bot::transport::{InboundItem, MemoryTransport, RedditTransport};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config_path = cli.config_path();

    if cli.generate {
        Config::write_default(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from_file(&config_path)?;
    config.reddit.apply_env_defaults();

    // Dry runs print to stdout, so their logs go to stderr.
    let log_guard: LogGuard = if cli.stderr_log || cli.dry_run.is_some() {
        logging::init_stderr_logging()
    } else {
        logging::init_file_logging(&config.logging)?
    };
    info!("Loaded config from: {}", config_path.display());

    let result = serve(&cli, &config).await;
    log_guard.record_failure(result)
}

/// Runs the bot, or a dry run, with logging already in place.
async fn serve(cli: &Cli, config: &Config) -> Result<()> {
    let fetcher = Arc::new(ReqwestFetcher::new(
        &config.providers,
        &config.reddit.user_agent,
    )?);

    if let Some(text) = cli.dry_run.as_deref() {
        return dry_run(cli, config, fetcher, text).await;
    }

    let transport = Arc::new(RedditTransport::new(
        &config.reddit,
        config.providers.timeout_secs,
    )?);
    let bot = Bot::new(config, transport, fetcher)?;

    match cli.poll_interval() {
        Some(interval) => {
            info!(secs = interval.as_secs(), "polling inbox");
            bot.run(interval).await
        }
        None => bot.run_cycle().await.map(|_| ()),
    }
}

/// Answers a single mention through the in-memory transport and prints what
/// would have been sent.
async fn dry_run(
    cli: &Cli,
    config: &Config,
    fetcher: Arc<ReqwestFetcher>,
    text: &str,
) -> Result<()> {
    let subreddit = cli
        .subreddit
        .clone()
        .unwrap_or_else(|| config.bot.name.clone());
    let transport = Arc::new(
        MemoryTransport::new().with_item(InboundItem::mention("dry_run", "dry_run", subreddit, text)),
    );
    let bot = Bot::new(config, transport.clone(), fetcher)?;
    let stats = bot.run_cycle().await?;

    for (title, body) in transport.posts() {
        println!("=== post: {title} ===\n{body}\n");
    }
    for (_, body) in transport.replies() {
        println!("=== reply ===\n{body}\n");
    }
    if stats.replied + stats.posted == 0 {
        println!("(no reply)");
    }

    Ok(())
}
