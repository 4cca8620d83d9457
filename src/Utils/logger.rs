use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Console logger setup shared by the examples and the binary. A second call
/// is a no-op: the first initialization stays in charge.
pub fn init_console_logger(log_option: LevelFilter) {
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);

    match logger_instance {
        Ok(()) => {
            info!("console logger initialized");
        }
        Err(_) => {
            // a logger was already set, keep it
        }
    }
}
