use tracing_log::AsTrace;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn verbosity_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

pub fn init(verbose: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbose).as_trace().into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_forest::ForestLayer::default())
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(verbosity_level(0), log::LevelFilter::Warn);
        assert_eq!(verbosity_level(1), log::LevelFilter::Info);
        assert_eq!(verbosity_level(2), log::LevelFilter::Debug);
        assert_eq!(verbosity_level(7), log::LevelFilter::Trace);
    }
}
