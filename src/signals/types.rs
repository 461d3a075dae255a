/*!
 * Signal Types
 * Linux signal definitions and result types
 */

use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// First real-time signal as seen by applications
///
/// 32 and 33 are taken by the C library for its own threading machinery.
pub const SIGRTMIN: i32 = 34;

/// Last real-time signal
pub const SIGRTMAX: i32 = 64;

/// Highest signal number the kernel can deliver
pub const MAX_SIGNAL: i32 = SIGRTMAX;

/// Operation that reached the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOperation {
    Send,
    Raise,
    Register,
    Reset,
    Ignore,
}

impl fmt::Display for SignalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalOperation::Send => "send",
            SignalOperation::Raise => "raise",
            SignalOperation::Register => "register",
            SignalOperation::Reset => "reset",
            SignalOperation::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SignalError {
    #[error("Unknown signal: {0}")]
    #[diagnostic(
        code(signals::unknown_signal),
        help("Valid signal numbers are 1-31 and 34-64. 32 and 33 are reserved by the C library.")
    )]
    UnknownSignal(i32),

    #[error("Unknown signal name: {0}")]
    #[diagnostic(
        code(signals::unknown_signal_name),
        help("Use a name such as SIGTERM, TERM, SIGRTMIN+3 or a decimal signal number.")
    )]
    UnknownSignalName(String),

    #[error("Operation {operation} failed for {signal}: {}", errno_text(.errno))]
    #[diagnostic(
        code(signals::operation_failed),
        help("The operating system rejected the call. SIGKILL and SIGSTOP cannot be caught, and sending needs permission over the target.")
    )]
    OperationFailed {
        operation: SignalOperation,
        signal: Signal,
        errno: i32,
    },
}

fn errno_text(errno: &i32) -> Errno {
    Errno::from_raw(*errno)
}

impl SignalError {
    pub(crate) fn operation_failed(operation: SignalOperation, signal: Signal, errno: Errno) -> Self {
        SignalError::OperationFailed {
            operation,
            signal,
            errno: errno as i32,
        }
    }

    /// OS error code behind a failed operation
    pub fn errno(&self) -> Option<Errno> {
        match self {
            SignalError::OperationFailed { errno, .. } => Some(Errno::from_raw(*errno)),
            _ => None,
        }
    }
}

/// Linux signal numbers
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Signal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP = 1,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT = 2,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT = 3,
    /// Illegal instruction
    SIGILL = 4,
    /// Trace/breakpoint trap
    SIGTRAP = 5,
    /// Abort signal from abort(3)
    SIGABRT = 6,
    /// Bus error (bad memory access)
    SIGBUS = 7,
    /// Floating-point exception
    SIGFPE = 8,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = 9,
    /// User-defined signal 1
    SIGUSR1 = 10,
    /// Invalid memory reference
    SIGSEGV = 11,
    /// User-defined signal 2
    SIGUSR2 = 12,
    /// Broken pipe: write to pipe with no readers
    SIGPIPE = 13,
    /// Timer signal from alarm(2)
    SIGALRM = 14,
    /// Termination signal
    SIGTERM = 15,
    /// Stack fault on coprocessor (unused)
    SIGSTKFLT = 16,
    /// Child stopped or terminated
    SIGCHLD = 17,
    /// Continue if stopped
    SIGCONT = 18,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = 19,
    /// Stop typed at terminal (Ctrl+Z)
    SIGTSTP = 20,
    /// Terminal input for background process
    SIGTTIN = 21,
    /// Terminal output for background process
    SIGTTOU = 22,
    /// Urgent condition on socket
    SIGURG = 23,
    /// CPU time limit exceeded
    SIGXCPU = 24,
    /// File size limit exceeded
    SIGXFSZ = 25,
    /// Virtual alarm clock
    SIGVTALRM = 26,
    /// Profiling timer expired
    SIGPROF = 27,
    /// Window resize signal
    SIGWINCH = 28,
    /// I/O now possible
    SIGIO = 29,
    /// Power failure
    SIGPWR = 30,
    /// Bad system call
    SIGSYS = 31,

    // Real-time signals
    SIGRTMIN = 34,
    SIGRTMIN_1 = 35,
    SIGRTMIN_2 = 36,
    SIGRTMIN_3 = 37,
    SIGRTMIN_4 = 38,
    SIGRTMIN_5 = 39,
    SIGRTMIN_6 = 40,
    SIGRTMIN_7 = 41,
    SIGRTMIN_8 = 42,
    SIGRTMIN_9 = 43,
    SIGRTMIN_10 = 44,
    SIGRTMIN_11 = 45,
    SIGRTMIN_12 = 46,
    SIGRTMIN_13 = 47,
    SIGRTMIN_14 = 48,
    SIGRTMIN_15 = 49,
    SIGRTMAX_14 = 50,
    SIGRTMAX_13 = 51,
    SIGRTMAX_12 = 52,
    SIGRTMAX_11 = 53,
    SIGRTMAX_10 = 54,
    SIGRTMAX_9 = 55,
    SIGRTMAX_8 = 56,
    SIGRTMAX_7 = 57,
    SIGRTMAX_6 = 58,
    SIGRTMAX_5 = 59,
    SIGRTMAX_4 = 60,
    SIGRTMAX_3 = 61,
    SIGRTMAX_2 = 62,
    SIGRTMAX_1 = 63,
    SIGRTMAX = 64,
}

/// Every defined signal in ascending numeric order
static ALL_SIGNALS: [Signal; 62] = [
    Signal::SIGHUP,
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGILL,
    Signal::SIGTRAP,
    Signal::SIGABRT,
    Signal::SIGBUS,
    Signal::SIGFPE,
    Signal::SIGKILL,
    Signal::SIGUSR1,
    Signal::SIGSEGV,
    Signal::SIGUSR2,
    Signal::SIGPIPE,
    Signal::SIGALRM,
    Signal::SIGTERM,
    Signal::SIGSTKFLT,
    Signal::SIGCHLD,
    Signal::SIGCONT,
    Signal::SIGSTOP,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
    Signal::SIGURG,
    Signal::SIGXCPU,
    Signal::SIGXFSZ,
    Signal::SIGVTALRM,
    Signal::SIGPROF,
    Signal::SIGWINCH,
    Signal::SIGIO,
    Signal::SIGPWR,
    Signal::SIGSYS,
    Signal::SIGRTMIN,
    Signal::SIGRTMIN_1,
    Signal::SIGRTMIN_2,
    Signal::SIGRTMIN_3,
    Signal::SIGRTMIN_4,
    Signal::SIGRTMIN_5,
    Signal::SIGRTMIN_6,
    Signal::SIGRTMIN_7,
    Signal::SIGRTMIN_8,
    Signal::SIGRTMIN_9,
    Signal::SIGRTMIN_10,
    Signal::SIGRTMIN_11,
    Signal::SIGRTMIN_12,
    Signal::SIGRTMIN_13,
    Signal::SIGRTMIN_14,
    Signal::SIGRTMIN_15,
    Signal::SIGRTMAX_14,
    Signal::SIGRTMAX_13,
    Signal::SIGRTMAX_12,
    Signal::SIGRTMAX_11,
    Signal::SIGRTMAX_10,
    Signal::SIGRTMAX_9,
    Signal::SIGRTMAX_8,
    Signal::SIGRTMAX_7,
    Signal::SIGRTMAX_6,
    Signal::SIGRTMAX_5,
    Signal::SIGRTMAX_4,
    Signal::SIGRTMAX_3,
    Signal::SIGRTMAX_2,
    Signal::SIGRTMAX_1,
    Signal::SIGRTMAX,
];

impl Signal {
    /// Convert from signal number
    ///
    /// Fails closed: numbers outside 1-31 and 34-64 never map to a signal.
    pub fn from_value(n: i32) -> SignalResult<Self> {
        match n {
            1..=31 => Ok(ALL_SIGNALS[(n - 1) as usize]),
            SIGRTMIN..=SIGRTMAX => Ok(ALL_SIGNALS[(n - 3) as usize]),
            _ => Err(SignalError::UnknownSignal(n)),
        }
    }

    /// Get signal number
    #[inline]
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Iterate over every defined signal in ascending order
    pub fn all() -> impl Iterator<Item = Signal> + Clone {
        ALL_SIGNALS.iter().copied()
    }

    /// Check if a handler can be installed for this signal
    pub fn can_catch(self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }

    /// Check if this is a real-time signal
    pub fn is_realtime(self) -> bool {
        self.value() >= SIGRTMIN
    }

    /// Canonical name, e.g. `SIGINT`, `SIGRTMIN+3`, `SIGRTMAX-2`
    pub fn name(self) -> &'static str {
        match self {
            Signal::SIGHUP => "SIGHUP",
            Signal::SIGINT => "SIGINT",
            Signal::SIGQUIT => "SIGQUIT",
            Signal::SIGILL => "SIGILL",
            Signal::SIGTRAP => "SIGTRAP",
            Signal::SIGABRT => "SIGABRT",
            Signal::SIGBUS => "SIGBUS",
            Signal::SIGFPE => "SIGFPE",
            Signal::SIGKILL => "SIGKILL",
            Signal::SIGUSR1 => "SIGUSR1",
            Signal::SIGSEGV => "SIGSEGV",
            Signal::SIGUSR2 => "SIGUSR2",
            Signal::SIGPIPE => "SIGPIPE",
            Signal::SIGALRM => "SIGALRM",
            Signal::SIGTERM => "SIGTERM",
            Signal::SIGSTKFLT => "SIGSTKFLT",
            Signal::SIGCHLD => "SIGCHLD",
            Signal::SIGCONT => "SIGCONT",
            Signal::SIGSTOP => "SIGSTOP",
            Signal::SIGTSTP => "SIGTSTP",
            Signal::SIGTTIN => "SIGTTIN",
            Signal::SIGTTOU => "SIGTTOU",
            Signal::SIGURG => "SIGURG",
            Signal::SIGXCPU => "SIGXCPU",
            Signal::SIGXFSZ => "SIGXFSZ",
            Signal::SIGVTALRM => "SIGVTALRM",
            Signal::SIGPROF => "SIGPROF",
            Signal::SIGWINCH => "SIGWINCH",
            Signal::SIGIO => "SIGIO",
            Signal::SIGPWR => "SIGPWR",
            Signal::SIGSYS => "SIGSYS",
            Signal::SIGRTMIN => "SIGRTMIN",
            Signal::SIGRTMIN_1 => "SIGRTMIN+1",
            Signal::SIGRTMIN_2 => "SIGRTMIN+2",
            Signal::SIGRTMIN_3 => "SIGRTMIN+3",
            Signal::SIGRTMIN_4 => "SIGRTMIN+4",
            Signal::SIGRTMIN_5 => "SIGRTMIN+5",
            Signal::SIGRTMIN_6 => "SIGRTMIN+6",
            Signal::SIGRTMIN_7 => "SIGRTMIN+7",
            Signal::SIGRTMIN_8 => "SIGRTMIN+8",
            Signal::SIGRTMIN_9 => "SIGRTMIN+9",
            Signal::SIGRTMIN_10 => "SIGRTMIN+10",
            Signal::SIGRTMIN_11 => "SIGRTMIN+11",
            Signal::SIGRTMIN_12 => "SIGRTMIN+12",
            Signal::SIGRTMIN_13 => "SIGRTMIN+13",
            Signal::SIGRTMIN_14 => "SIGRTMIN+14",
            Signal::SIGRTMIN_15 => "SIGRTMIN+15",
            Signal::SIGRTMAX_14 => "SIGRTMAX-14",
            Signal::SIGRTMAX_13 => "SIGRTMAX-13",
            Signal::SIGRTMAX_12 => "SIGRTMAX-12",
            Signal::SIGRTMAX_11 => "SIGRTMAX-11",
            Signal::SIGRTMAX_10 => "SIGRTMAX-10",
            Signal::SIGRTMAX_9 => "SIGRTMAX-9",
            Signal::SIGRTMAX_8 => "SIGRTMAX-8",
            Signal::SIGRTMAX_7 => "SIGRTMAX-7",
            Signal::SIGRTMAX_6 => "SIGRTMAX-6",
            Signal::SIGRTMAX_5 => "SIGRTMAX-5",
            Signal::SIGRTMAX_4 => "SIGRTMAX-4",
            Signal::SIGRTMAX_3 => "SIGRTMAX-3",
            Signal::SIGRTMAX_2 => "SIGRTMAX-2",
            Signal::SIGRTMAX_1 => "SIGRTMAX-1",
            Signal::SIGRTMAX => "SIGRTMAX",
        }
    }

    /// Get human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Signal::SIGHUP => "Hangup",
            Signal::SIGINT => "Interrupt",
            Signal::SIGQUIT => "Quit",
            Signal::SIGILL => "Illegal instruction",
            Signal::SIGTRAP => "Trace/breakpoint trap",
            Signal::SIGABRT => "Aborted",
            Signal::SIGBUS => "Bus error",
            Signal::SIGFPE => "Floating point exception",
            Signal::SIGKILL => "Killed",
            Signal::SIGUSR1 => "User defined signal 1",
            Signal::SIGSEGV => "Segmentation fault",
            Signal::SIGUSR2 => "User defined signal 2",
            Signal::SIGPIPE => "Broken pipe",
            Signal::SIGALRM => "Alarm clock",
            Signal::SIGTERM => "Terminated",
            Signal::SIGSTKFLT => "Stack fault",
            Signal::SIGCHLD => "Child status changed",
            Signal::SIGCONT => "Continued",
            Signal::SIGSTOP => "Stopped (signal)",
            Signal::SIGTSTP => "Stopped",
            Signal::SIGTTIN => "Stopped (tty input)",
            Signal::SIGTTOU => "Stopped (tty output)",
            Signal::SIGURG => "Urgent I/O condition",
            Signal::SIGXCPU => "CPU time limit exceeded",
            Signal::SIGXFSZ => "File size limit exceeded",
            Signal::SIGVTALRM => "Virtual timer expired",
            Signal::SIGPROF => "Profiling timer expired",
            Signal::SIGWINCH => "Window size changed",
            Signal::SIGIO => "I/O possible",
            Signal::SIGPWR => "Power failure",
            Signal::SIGSYS => "Bad system call",
            _ => "Real-time signal",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Signal {
    type Error = SignalError;

    fn try_from(value: i32) -> SignalResult<Self> {
        Signal::from_value(value)
    }
}

impl From<Signal> for i32 {
    fn from(signal: Signal) -> Self {
        signal.value()
    }
}

impl FromStr for Signal {
    type Err = SignalError;

    /// Parse `SIGTERM`, `term`, `SIGRTMIN+3` or `15`
    fn from_str(s: &str) -> SignalResult<Self> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i32>() {
            return Signal::from_value(n);
        }

        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        Signal::all()
            .find(|signal| &signal.name()[3..] == bare)
            .ok_or_else(|| SignalError::UnknownSignalName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (i, signal) in ALL_SIGNALS.iter().enumerate() {
            let expected = if i < 31 { i as i32 + 1 } else { i as i32 + 3 };
            assert_eq!(signal.value(), expected, "{:?}", signal);
        }
    }

    #[test]
    fn test_reserved_gap_is_rejected() {
        assert_eq!(Signal::from_value(32), Err(SignalError::UnknownSignal(32)));
        assert_eq!(Signal::from_value(33), Err(SignalError::UnknownSignal(33)));
        assert_eq!(Signal::from_value(31), Ok(Signal::SIGSYS));
        assert_eq!(Signal::from_value(34), Ok(Signal::SIGRTMIN));
    }

    #[test]
    fn test_realtime_names() {
        assert_eq!(Signal::SIGRTMIN_15.name(), "SIGRTMIN+15");
        assert_eq!(Signal::SIGRTMAX_14.name(), "SIGRTMAX-14");
        assert_eq!(Signal::SIGRTMAX_14.value(), SIGRTMAX - 14);
        assert_eq!(Signal::SIGRTMIN_15.value(), SIGRTMIN + 15);
    }

    #[test]
    fn test_operation_failed_message() {
        let err = SignalError::operation_failed(
            SignalOperation::Register,
            Signal::SIGKILL,
            Errno::EINVAL,
        );
        assert_eq!(err.errno(), Some(Errno::EINVAL));
        let message = err.to_string();
        assert!(message.starts_with("Operation register failed for SIGKILL: "));
    }
}
