/*!
 * Signal Handler
 * Handler capability and registration options
 */

use super::siginfo::SigInfo;
use super::types::Signal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Anything that can react to a delivered signal
///
/// Implemented for every `Fn(Signal, &SigInfo)` closure, so plain functions
/// and closures work directly; stateful types can implement it by hand.
///
/// `handle` runs in signal context on whichever thread the kernel picked.
/// Keep it async-signal-safe: atomics and `write(2)` are fine, locks and
/// allocation are not. Panicking aborts the process.
pub trait SignalHandler: Send + Sync + 'static {
    fn handle(&self, signal: Signal, info: &SigInfo);
}

impl<F> SignalHandler for F
where
    F: Fn(Signal, &SigInfo) + Send + Sync + 'static,
{
    #[inline]
    fn handle(&self, signal: Signal, info: &SigInfo) {
        self(signal, info)
    }
}

/// Shared handler reference
pub type HandlerRef = Arc<dyn SignalHandler>;

/// Options applied when installing a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOptions {
    /// Restart system calls interrupted by this signal (`SA_RESTART`)
    pub restart_syscalls: bool,
}

impl RegisterOptions {
    pub fn new() -> Self {
        Self {
            restart_syscalls: true,
        }
    }

    pub fn with_restart_syscalls(mut self, restart: bool) -> Self {
        self.restart_syscalls = restart;
        self
    }
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self::new()
    }
}
