use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` syntax (e.g. `"info"`, `"ember_engine=debug"`).
/// Without it `RUST_LOG` applies, then `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Caps the chatty GPU crates at `warn` unless the filter names them.
    pub quiet_gpu: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            quiet_gpu: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

const GPU_CRATES: [&str; 4] = ["wgpu_core", "wgpu_hal", "wgpu", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);

        let filter = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok());

        if config.quiet_gpu {
            for name in GPU_CRATES {
                builder.filter_module(name, log::LevelFilter::Warn);
            }
        }

        // Parsed last so explicit directives override the defaults above.
        if let Some(filter) = filter.as_deref() {
            builder.parse_filters(filter);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            log::debug!("a logger was already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}
