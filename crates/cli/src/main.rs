//! localpages command line entry point.
//!
//! Resolves a landing page from the terminal and maintains the content
//! cache. Logging goes to stderr so stdout stays clean for page output.

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use localpages_client::{GeneratorConfig, HttpGenerator};
use localpages_core::config::AppConfig;
use localpages_core::{CacheDb, ContentGenerator, ContentStore};
use localpages_resolver::PageContentResolver;

enum Command {
    Resolve { location: String, service: String },
    Purge { location: Option<String>, max_entries: Option<usize> },
    Stats,
}

const USAGE: &str = "usage:
  localpages resolve [<location>] [<service>]
  localpages purge [--location <name>] [--max-entries <n>]
  localpages stats";

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    match args.next().as_deref() {
        Some("resolve") => {
            let location = args.next().unwrap_or_default();
            let service = args.next().unwrap_or_default();
            Ok(Command::Resolve { location, service })
        }
        Some("purge") => {
            let mut location = None;
            let mut max_entries = None;

            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--location" => {
                        location = Some(args.next().ok_or_else(|| anyhow::anyhow!("--location needs a value"))?);
                    }
                    "--max-entries" => {
                        let value = args.next().ok_or_else(|| anyhow::anyhow!("--max-entries needs a value"))?;
                        max_entries = Some(value.parse()?);
                    }
                    other => bail!("unknown purge flag: {other}\n{USAGE}"),
                }
            }

            if location.is_none() && max_entries.is_none() {
                bail!("purge needs --location or --max-entries\n{USAGE}");
            }

            Ok(Command::Purge { location, max_entries })
        }
        Some("stats") => Ok(Command::Stats),
        Some(other) => bail!("unknown command: {other}\n{USAGE}"),
        None => bail!("{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command = parse_args(std::env::args().skip(1))?;

    let config = AppConfig::load()?;
    tracing::info!("content cache at {}", config.db_path.display());

    let db = CacheDb::open(&config.db_path).await?;

    match command {
        Command::Resolve { location, service } => {
            let generator_config = GeneratorConfig::from_app_config(&config)?;
            let generator =
                HttpGenerator::new(generator_config, Arc::new(db.clone()) as Arc<dyn ContentStore>)?;
            let resolver = PageContentResolver::new(
                Arc::new(db) as Arc<dyn ContentStore>,
                Arc::new(generator) as Arc<dyn ContentGenerator>,
            );

            let resolution = resolver.resolve_detailed(&location, &service).await;

            println!("key:    {}", resolution.key);
            println!("source: {:?}", resolution.source);
            println!("{}", serde_json::to_string_pretty(&resolution.bundle)?);
        }
        Command::Purge { location, max_entries } => {
            let mut deleted = 0u64;
            if let Some(location) = location {
                deleted += db.purge_location(&location).await?;
            }
            if let Some(max) = max_entries {
                deleted += db.purge_lru(max).await?;
            }
            println!("deleted {deleted} entries");
        }
        Command::Stats => {
            println!("{} cached entries", db.entry_count().await?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_resolve() {
        let command = parse_args(args(&["resolve", "manchester", "payroll"])).unwrap();
        assert!(matches!(
            command,
            Command::Resolve { location, service } if location == "manchester" && service == "payroll"
        ));
    }

    #[test]
    fn test_parse_resolve_defaults_to_blank() {
        let command = parse_args(args(&["resolve"])).unwrap();
        assert!(matches!(
            command,
            Command::Resolve { location, service } if location.is_empty() && service.is_empty()
        ));
    }

    #[test]
    fn test_parse_purge_location() {
        let command = parse_args(args(&["purge", "--location", "leeds"])).unwrap();
        assert!(matches!(
            command,
            Command::Purge { location: Some(location), max_entries: None } if location == "leeds"
        ));
    }

    #[test]
    fn test_parse_purge_requires_a_filter() {
        assert!(parse_args(args(&["purge"])).is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_args(args(&["frobnicate"])).is_err());
    }

    #[test]
    fn test_parse_no_command() {
        assert!(parse_args(args(&[])).is_err());
    }
}
