use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr subscriber. `RUST_LOG` wins over the `--debug` default.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "lab_site=debug,lab_site_cli=debug"
    } else {
        "lab_site=warn,lab_site_cli=info"
    };

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
