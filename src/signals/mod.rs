/*!
 * Signals Module
 * Typed POSIX signal delivery and handler installation
 */

mod callbacks;
mod handler;
mod registry;
mod siginfo;
mod sys;
pub mod traits;
pub mod types;

// Re-export public API
pub use handler::{HandlerRef, RegisterOptions, SignalHandler};
pub use registry::{
    ignore, raise, register, reset, send, try_ignore, try_raise, try_register,
    try_register_shared, try_reset, try_send, SignalRegistry,
};
pub use siginfo::SigInfo;
pub use traits::*;
pub use types::{
    Signal, SignalError, SignalOperation, SignalResult, MAX_SIGNAL, SIGRTMAX, SIGRTMIN,
};
