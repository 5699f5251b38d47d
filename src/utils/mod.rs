pub mod persistence;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIR_NAME: &str = ".ledger_core";
const HOME_ENV: &str = "LEDGER_CORE_HOME";
const DEFAULT_DIRECTIVE: &str = "ledger_core=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `ledger_core=info` is always applied, then `directive` (e.g. a config's
/// `log_filter`) on top of `RUST_LOG`. Only the first call has effect.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        for raw in std::iter::once(DEFAULT_DIRECTIVE).chain(directive) {
            match raw.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(err) => eprintln!("ignoring log filter `{raw}`: {err}"),
            }
        }
        // A subscriber installed by the host wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Returns the application data directory, defaulting to `~/.ledger_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
