use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Cart modules at `level`; HTTP client internals only surface problems.
fn cart_directives(level: &str) -> String {
    format!(
        "warn,cart_store={level},cart_store::adapters::catalog={level},reqwest=warn,hyper=warn"
    )
}

fn cart_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let level = match (verbose, level) {
        (true, _) => "debug",
        (false, Some(level)) => level,
        (false, None) => "info",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cart_directives(level)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(cart_filter(verbose, None))
        .with(
            tracing_subscriber::fmt::layer()
                // Module targets tell catalog, storage and store events apart.
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(cart_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
