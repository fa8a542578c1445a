use std::env;

use once_cell::sync::Lazy;

pub static DEBUG_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("MARGINALIA_DEBUG")
        .map_or(false, |log_level| log_level.eq("true") || log_level.eq("1"))
});

/// Logs a debug message with optional formatted arguments.
///
/// Messages are only printed when the `MARGINALIA_DEBUG` environment variable
/// is set to `true` or `1` (read once, on first use).
///
/// # Examples
///
/// ```
/// use marginalia::debug;
///
/// debug!("Initialization pass started");
/// debug!("Registered transformer from \"{}\"", "table");
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:expr) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("{}", $fmt)));
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!($fmt, $($arg)*)));
        }
    };
}
