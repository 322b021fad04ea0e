use anyhow::Result;
use clap::Parser;
use seedscope::cli::RootArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);
    seedscope::commands::run(args)
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`. Logs go to
/// stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "seedscope=debug"
    } else {
        "seedscope=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
