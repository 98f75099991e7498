//! Backend-neutral logging macros
//!
//! Every record in this crate goes through the `*_log!` macros below, which
//! forward to `log` or `tracing` depending on the enabled feature. With
//! neither feature the macros expand to nothing and their arguments are not
//! evaluated.
//!
//! Levels used by link bindings and the router:
//!
//! | Level   | Records                                             |
//! |---------|-----------------------------------------------------|
//! | `trace` | click decisions, path changes, listener fan-out     |
//! | `debug` | bind and unbind, skipped navigations                |
//! | `info`  | completed router navigations                        |
//! | `warn`  | links bound outside a router, unresolvable targets  |
//! | `error` | active patterns that fail to compile                |
//!
//! ```ignore
//! use router_link::{debug_log, warn_log};
//!
//! debug_log!("link bound to {}", path);
//! warn_log!("link used outside of a router");
//! ```

/// Forwards to `trace!` of the enabled backend
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Forwards to `debug!` of the enabled backend
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Warnings about misuse the crate recovers from.
///
/// A link created without a router reports here once, at bind time, and
/// stays inert afterwards.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Errors that leave a link without active matching
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
