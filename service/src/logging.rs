use crate::config::Config;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Modules to filter out of log output when not running at Trace level.
/// These are verbose dependencies that clutter normal output.
const FILTERED_MODULES: &[&str] = &["sqlx", "sea_orm", "tower", "tracing", "hyper", "axum"];

/// Initializes the global terminal logger. Dependency logs are suppressed
/// unless the configured level is Trace.
pub fn init(config: &Config) {
    TermLogger::init(
        config.log_level_filter,
        term_config(config.log_level_filter),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to start simplelog");
}

fn term_config(level: LevelFilter) -> simplelog::Config {
    let mut builder = ConfigBuilder::new();
    builder.set_time_format_rfc3339();

    if level != LevelFilter::Trace {
        for module in FILTERED_MODULES {
            builder.add_filter_ignore_str(module);
        }
    }

    builder.build()
}
