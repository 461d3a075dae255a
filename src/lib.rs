/*!
 * POSIX Signals Library
 * Strongly typed signal numbers, delivery and handler installation
 */

pub mod core;
pub mod monitoring;
pub mod signals;

// Re-exports
pub use crate::core::types::Pid;
pub use monitoring::{init_tracing, init_tracing_with, TracingConfig};
pub use signals::{
    ignore, raise, register, reset, send, HandlerRegistry, RegisterOptions, SigInfo, Signal,
    SignalDelivery, SignalError, SignalHandler, SignalRegistry, SignalResult,
};
