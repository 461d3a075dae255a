/*!
 * Signal Registry
 * Sending signals and installing handlers
 */

use super::callbacks;
use super::handler::{HandlerRef, RegisterOptions, SignalHandler};
use super::sys;
use super::traits::{HandlerRegistry, SignalDelivery};
use super::types::{Signal, SignalError, SignalOperation, SignalResult};
use crate::core::types::Pid;
use std::sync::Arc;
use tracing::{debug, warn};

/// Process-wide signal registry
///
/// Zero-sized: the disposition table lives in the kernel and the handler
/// slots are global, so every instance sees the same state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalRegistry;

impl SignalRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl SignalDelivery for SignalRegistry {
    fn send(&self, signal: Signal, pid: Pid) -> bool {
        send(signal, pid)
    }

    fn raise(&self, signal: Signal) -> bool {
        raise(signal)
    }
}

impl HandlerRegistry for SignalRegistry {
    fn register(&self, signal: Signal, handler: HandlerRef, options: RegisterOptions) -> bool {
        try_register_shared(signal, handler, options).is_ok()
    }

    fn reset(&self, signal: Signal) -> bool {
        reset(signal)
    }

    fn ignore(&self, signal: Signal) -> bool {
        ignore(signal)
    }
}

/// Send `signal` to `pid`
///
/// `pid` follows `kill(2)`: 0 targets the caller's process group, -1 every
/// process the caller may signal, other negatives the group `-pid`.
pub fn try_send(signal: Signal, pid: Pid) -> SignalResult<()> {
    match sys::kill(pid, signal.value()) {
        Ok(()) => {
            debug!(signal = %signal, pid, "signal sent");
            Ok(())
        }
        Err(errno) => {
            warn!(signal = %signal, pid, error = %errno, "failed to send signal");
            Err(SignalError::operation_failed(SignalOperation::Send, signal, errno))
        }
    }
}

/// Send `signal` to `pid`, reporting only success
pub fn send(signal: Signal, pid: Pid) -> bool {
    try_send(signal, pid).is_ok()
}

/// Send `signal` to the calling thread
///
/// The handler, if any, has run by the time this returns.
pub fn try_raise(signal: Signal) -> SignalResult<()> {
    match sys::raise(signal.value()) {
        Ok(()) => {
            debug!(signal = %signal, "signal raised");
            Ok(())
        }
        Err(errno) => {
            warn!(signal = %signal, error = %errno, "failed to raise signal");
            Err(SignalError::operation_failed(SignalOperation::Raise, signal, errno))
        }
    }
}

pub fn raise(signal: Signal) -> bool {
    try_raise(signal).is_ok()
}

/// Install `handler` for `signal`, replacing any previous handler
pub fn try_register<H>(signal: Signal, handler: H, options: RegisterOptions) -> SignalResult<()>
where
    H: SignalHandler,
{
    try_register_shared(signal, Arc::new(handler), options)
}

/// Install an already shared handler
pub fn try_register_shared(
    signal: Signal,
    handler: HandlerRef,
    options: RegisterOptions,
) -> SignalResult<()> {
    // The slot has to be filled before the kernel can call the trampoline
    let previous = callbacks::replace(signal, Some(handler));

    match sys::install_trampoline(signal.value(), options.restart_syscalls) {
        Ok(()) => {
            debug!(
                signal = %signal,
                restart_syscalls = options.restart_syscalls,
                replaced = previous.is_some(),
                "signal handler registered"
            );
            Ok(())
        }
        Err(errno) => {
            callbacks::replace(signal, previous);
            warn!(signal = %signal, error = %errno, "failed to register signal handler");
            Err(SignalError::operation_failed(SignalOperation::Register, signal, errno))
        }
    }
}

/// Install `handler` for `signal`, reporting only success
///
/// With `restart_syscalls` the kernel resumes system calls the signal
/// interrupted instead of failing them with EINTR.
pub fn register<H>(signal: Signal, handler: H, restart_syscalls: bool) -> bool
where
    H: SignalHandler,
{
    let options = RegisterOptions::new().with_restart_syscalls(restart_syscalls);
    try_register(signal, handler, options).is_ok()
}

/// Restore the default disposition for `signal`
pub fn try_reset(signal: Signal) -> SignalResult<()> {
    change_disposition(signal, SignalOperation::Reset, sys::install_default)
}

pub fn reset(signal: Signal) -> bool {
    try_reset(signal).is_ok()
}

/// Ignore `signal` from now on
pub fn try_ignore(signal: Signal) -> SignalResult<()> {
    change_disposition(signal, SignalOperation::Ignore, sys::install_ignore)
}

pub fn ignore(signal: Signal) -> bool {
    try_ignore(signal).is_ok()
}

fn change_disposition(
    signal: Signal,
    operation: SignalOperation,
    install: fn(i32) -> nix::Result<()>,
) -> SignalResult<()> {
    match install(signal.value()) {
        Ok(()) => {
            // The trampoline is gone; the stored handler is freed once no
            // delivery still runs it
            let dropped = callbacks::replace(signal, None);
            debug!(
                signal = %signal,
                operation = %operation,
                dropped_handler = dropped.is_some(),
                "signal disposition changed"
            );
            Ok(())
        }
        Err(errno) => {
            warn!(signal = %signal, operation = %operation, error = %errno, "failed to change signal disposition");
            Err(SignalError::operation_failed(operation, signal, errno))
        }
    }
}

impl Signal {
    /// Send this signal to a process
    pub fn kill(self, pid: Pid) -> bool {
        send(self, pid)
    }

    /// Install a handler for this signal, restarting interrupted system calls
    pub fn handle<H: SignalHandler>(self, handler: H) -> bool {
        register(self, handler, true)
    }

    /// Install a handler for this signal with explicit options
    pub fn handle_with<H: SignalHandler>(self, handler: H, options: RegisterOptions) -> bool {
        try_register(self, handler, options).is_ok()
    }
}
