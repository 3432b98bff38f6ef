//! Thin wrappers over `tracing` so call sites read like the original
//! `Log::Info`/`Log::Debug`/`Log::Fatal` calls without pinning a level to
//! the macro name. `max_level_debug`/`max_level_trace` gate how much of
//! this is even compiled in, mirroring `fantoch`'s own features of the
//! same name.

#[cfg(feature = "max_level_trace")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}
#[cfg(not(feature = "max_level_trace"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(any(feature = "max_level_trace", feature = "max_level_debug"))]
macro_rules! log {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(any(feature = "max_level_trace", feature = "max_level_debug")))]
macro_rules! log {
    ($($arg:tt)*) => {};
}

macro_rules! warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

pub(crate) use log;
pub(crate) use trace;
pub(crate) use warn;
