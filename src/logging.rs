//! Logger setup

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize the global logger. `RUST_LOG` overrides the default level,
/// which is debug when `verbose` and info otherwise.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only if a logger is already installed (repeat calls in tests)
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_is_idempotent() {
        super::init(false);
        super::init(true);
        log::info!("logger still usable");
    }
}
