mod signal;

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use podsync_core::{
    logging, parse_url, BuildContext, BuilderArgs, BuilderRegistry, Config,
    models::{BuildConfig, Feed},
};

#[derive(Parser, Debug)]
#[command(name = "podsync")]
#[command(about = "Build podcast feed metadata from video platform pages", long_about = None)]
struct Args {
    /// Config file (YAML, TOML or JSON)
    #[arg(short, long, env = "PODSYNC_CONFIG")]
    config: Option<String>,

    /// Episodes per feed, overriding configured values
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<usize>,

    /// Log level, overriding the configured one
    #[arg(long)]
    log_level: Option<String>,

    /// Source URLs to build instead of the configured feeds
    urls: Vec<String>,
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("page size must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Feeds to build, keyed by the name they are reported under
fn select_feeds(args: &Args, config: &Config) -> BTreeMap<String, BuildConfig> {
    let mut feeds: BTreeMap<String, BuildConfig> = if args.urls.is_empty() {
        config.feeds.clone()
    } else {
        args.urls
            .iter()
            .map(|url| (url.clone(), BuildConfig::new(url.as_str())))
            .collect()
    };

    if let Some(page_size) = args.page_size {
        for feed in feeds.values_mut() {
            feed.page_size = page_size;
        }
    }
    feeds
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let mut config = Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        anyhow::bail!("Configuration validation failed with {} error(s)", errors.len());
    }

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;

    let feeds = select_feeds(&args, &config);
    if feeds.is_empty() {
        anyhow::bail!("nothing to build: pass source URLs or configure feeds");
    }
    info!(feeds = feeds.len(), "podsync starting");

    // 3. Cancel in-flight builds on Ctrl+C or SIGTERM
    let ctx = BuildContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        signal::shutdown_signal().await;
        canceller.cancel();
    });

    // 4. Build every feed, stopping at the first failure
    let registry = BuilderRegistry::with_defaults();
    let builder_args = BuilderArgs::new(config.http.client_options());
    let mut built: BTreeMap<String, Feed> = BTreeMap::new();

    for (id, cfg) in feeds {
        let feed = match build_one(&registry, &builder_args, &ctx, &cfg).await {
            Ok(feed) => feed,
            Err(e) => {
                error!(feed = %id, url = %cfg.url, "feed build failed: {e:#}");
                return Err(e.context(format!("feed {id}")));
            }
        };
        info!(feed = %id, episodes = feed.episodes.len(), "feed built");
        built.insert(id, feed);
    }

    // 5. Emit results
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &built)?;
    writeln!(stdout)?;

    Ok(())
}

async fn build_one(
    registry: &BuilderRegistry,
    args: &BuilderArgs,
    ctx: &BuildContext,
    cfg: &BuildConfig,
) -> Result<Feed> {
    let provider = parse_url(&cfg.url)?.provider;
    let builder = registry.create(provider, args)?;
    Ok(builder.build(ctx, cfg).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("podsync").chain(extra.iter().copied()))
    }

    #[test]
    fn test_urls_replace_configured_feeds() {
        let mut config = Config::default();
        config
            .feeds
            .insert("me".to_string(), BuildConfig::new("https://space.bilibili.com/1"));

        let feeds = select_feeds(&args(&["https://space.bilibili.com/42"]), &config);
        assert_eq!(feeds.len(), 1);
        assert_eq!(
            feeds["https://space.bilibili.com/42"].url,
            "https://space.bilibili.com/42"
        );
    }

    #[test]
    fn test_page_size_override() {
        let mut config = Config::default();
        config.feeds.insert(
            "me".to_string(),
            BuildConfig::new("https://space.bilibili.com/1").with_page_size(50),
        );

        let feeds = select_feeds(&args(&["--page-size", "5"]), &config);
        assert_eq!(feeds["me"].page_size, 5);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(Args::try_parse_from(["podsync", "--page-size", "0"]).is_err());
        assert!(parse_page_size("abc").is_err());
        assert_eq!(parse_page_size("7"), Ok(7));
    }
}
