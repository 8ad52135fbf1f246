use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive.
const LOG_ENV: &str = "VHOST_LOG";

/// Install the stderr subscriber; `VHOST_LOG` wins over `-v` flags.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("vhost={default_level}")));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
