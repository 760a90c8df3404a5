use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter directive for the library's log output, e.g. `clang_vim=debug`.
pub const LOG_ENV: &str = "LIBCLANG_VIM_LOG";

static INIT: Once = Once::new();

/// Install a stderr subscriber with `filter`. Does nothing when a global
/// subscriber already exists.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Install a subscriber the first time this is called, only when
/// [`LOG_ENV`] is set. The editor's stderr stays clean otherwise.
pub fn init_from_env() {
    INIT.call_once(|| {
        if let Ok(filter) = std::env::var(LOG_ENV) {
            init(&filter);
        }
    });
}
