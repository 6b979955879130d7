use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingConfig, Section};

// Keep a guard for non-blocking console to avoid being dropped.
static CONSOLE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the console subscriber described by `cfg`.
///
/// `RUST_LOG`, when set, caps every target on top of the configured levels.
pub fn init_logging(cfg: &LoggingConfig) {
    let env: Option<EnvFilter> = EnvFilter::try_from_default_env().ok();

    let (nb_stderr, guard) = tracing_appender::non_blocking(std::io::stderr());
    _ = CONSOLE_GUARD.set(guard);

    let console_layer = fmt::layer()
        .with_writer(nb_stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_console_targets(cfg));

    _ = Registry::default().with(env).with(console_layer).try_init();
}

fn build_console_targets(cfg: &LoggingConfig) -> Targets {
    let default_level = cfg
        .get("default")
        .map_or(Some(tracing::Level::INFO), |s| s.console_level)
        .map_or(LevelFilter::OFF, LevelFilter::from_level);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != "default")
        .fold(
            Targets::new().with_default(default_level),
            |targets, (name, section)| targets.with_target(name.clone(), level_of(section)),
        )
}

fn level_of(section: &Section) -> LevelFilter {
    section
        .console_level
        .map_or(LevelFilter::OFF, LevelFilter::from_level)
}
