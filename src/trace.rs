use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use {tracing_subscriber::layer::SubscriberExt, tracing_subscriber::util::SubscriberInitExt};

/// Log to stderr at `level`, and to Tracy when built with the `tracing` feature
pub fn setup(level: LevelFilter) {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(level);
    let registry = tracing_subscriber::registry().with(fmt);

    #[cfg(feature = "tracing")]
    let registry = registry.with(tracing_tracy::TracyLayer::default());

    registry.init();
}

/// Map a `-v` count to a level, warnings being the default
pub fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
