use crate::cli::LogFormat;
use tracing_subscriber::EnvFilter;

pub fn init_logging(log_format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_format {
        LogFormat::Plain => builder.try_init().ok(),
        LogFormat::Json => builder.json().try_init().ok(),
    };
}
