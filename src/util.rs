// Logging setup for the browser: console output via console_log plus the panic hook.
use log::Level;

/// Installs the console logger and panic hook on wasm32. Safe to call twice.
pub fn init_logging(level: Level) {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::debug!("logger already installed");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::set_max_level(level.to_level_filter());
}
