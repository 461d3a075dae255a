/*!
 * Signal Traits
 * Seams between callers and the operating system
 */

use super::handler::{HandlerRef, RegisterOptions};
use super::types::Signal;
use crate::core::types::Pid;

/// Signal delivery interface
pub trait SignalDelivery: Send + Sync {
    /// Send a signal to a process, returning false if the OS refused
    fn send(&self, signal: Signal, pid: Pid) -> bool;

    /// Send a signal to the calling thread
    fn raise(&self, signal: Signal) -> bool;
}

/// Signal disposition management
pub trait HandlerRegistry: Send + Sync {
    /// Install a handler, replacing whatever was there
    fn register(&self, signal: Signal, handler: HandlerRef, options: RegisterOptions) -> bool;

    /// Restore the default disposition
    fn reset(&self, signal: Signal) -> bool;

    /// Ignore the signal
    fn ignore(&self, signal: Signal) -> bool;
}
