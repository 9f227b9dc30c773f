//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable. Hosts that already
/// configure a `log` backend should skip this.
///
/// # Example
/// ```
/// glimmer::core::logging::init();
/// log::info!("Light streaming ready");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}
