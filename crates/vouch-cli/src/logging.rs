//! Subscriber setup for the binary. Library crates only emit events.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

const QUIET: &str = "vouch=warn,vouch_core=warn";
const VERBOSE: &str = "vouch=debug,vouch_core=debug";

/// Shape of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins unless `verbose` is set, which forces debug output for
/// both crates. Installing twice is harmless: the second attempt is ignored.
pub(crate) fn init(format: LogFormat, verbose: bool) {
    let filter = build_filter(verbose);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(err) = installed {
        eprintln!("warning: logging already initialized: {err}");
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(QUIET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_environment() {
        assert_eq!(build_filter(true).to_string(), EnvFilter::new(VERBOSE).to_string());
    }

    #[test]
    fn second_init_is_ignored() {
        init(LogFormat::Text, false);
        init(LogFormat::Json, true);
    }
}
