use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive, e.g. `teller=debug`.
pub const LOG_ENV: &str = "TELLER_LOG";

/// Initialize tracing on stderr.
///
/// `TELLER_LOG` wins when set. Otherwise only warnings are shown, or
/// everything from this crate at debug level with `--verbose`.
/// Stdout is left alone so exports can be piped.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "teller=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true);

    // A second init (e.g. from tests) is not an error worth surfacing
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
