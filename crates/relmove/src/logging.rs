//! Tracing subscriber setup for the command line.
//!
//! Library crates log through `log`; the subscriber installed here picks
//! those records up together with the `tracing` spans of the vault and
//! batch operations. `RUST_LOG` overrides the configured level.

use std::str::FromStr;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Output format of diagnostic logs (always written to stderr)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown log format: {} (expected human or json)", other)),
        }
    }
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("warn,relmove={level},relmove_core={level},relmove_vault={level},relmove_batch={level},relmove_graph={level}")
}

/// Install the global subscriber. Fails when one is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    match format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()?;
        }
        LogFormat::Human => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_default_filter_is_valid() {
        let filter = default_filter("debug");
        assert!(filter.contains("relmove_batch=debug"));
        assert!(EnvFilter::try_new(filter).is_ok());
    }
}
