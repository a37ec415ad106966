use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MEDIALIB_SEARCH_LOG";

static INIT: OnceCell<()> = OnceCell::new();

/// Installs a fmt subscriber filtered by `MEDIALIB_SEARCH_LOG` (default
/// `warn`). Safe to call repeatedly; a subscriber already installed by the
/// host process wins.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
