//! Console logging macros
//!
//! On wasm32 messages go to the browser console through `web_sys`.
//! On native targets the arguments are still type-checked but nothing is
//! printed, so tests and embedding hosts stay quiet.
//!
//! Usage:
//! ```rust
//! use planar_physics::console_log;
//!
//! let steps = 3;
//! console_log!("advanced {} sub-steps", steps);
//! ```

/// Log an informational message to the browser console.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a warning to the browser console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
