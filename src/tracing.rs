use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Installs the global subscriber for the `boxoffice` binary.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Output goes to
/// stderr so that `--format json` keeps stdout machine-readable.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

/// Default filter for the CLI: quiet HTTP internals, chatty crate logs when verbose.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info,hyper=warn,reqwest=warn"
    }
}
