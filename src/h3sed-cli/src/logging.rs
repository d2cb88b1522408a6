//! Logging setup
//!
//! Library events go to stderr so command output on stdout stays clean.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "h3sed=debug,h3sed_cli=debug"
    } else {
        "h3sed=info,h3sed_cli=info"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert!(default_filter(true).contains("h3sed=debug"));
        assert!(default_filter(false).contains("h3sed=info"));
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
