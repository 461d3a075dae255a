/*!
 * Signal Info
 * Delivery metadata handed to signal handlers
 */

use crate::core::types::{Address, Pid, Uid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata the kernel attaches to a delivered signal
///
/// Built on the stack inside the delivery trampoline, so it never
/// allocates. Optional fields are only filled in when the signal code says
/// the kernel populated them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigInfo {
    /// Raw signal number
    pub signo: i32,
    /// errno value associated with the signal, usually 0
    pub errno: i32,
    /// Signal code (`SI_USER`, `SI_QUEUE`, `CLD_EXITED`, `SEGV_MAPERR`...)
    pub code: i32,
    /// Sending process
    pub pid: Option<Pid>,
    /// Real user ID of the sending process
    pub uid: Option<Uid>,
    /// Exit value or signal of a child, for SIGCHLD
    pub status: Option<i32>,
    /// Faulting address, for SIGILL, SIGFPE, SIGSEGV and SIGBUS
    pub addr: Option<Address>,
}

impl SigInfo {
    /// String-keyed view of the populated fields
    ///
    /// Always contains `signo`, `errno` and `code`.
    pub fn entries(&self) -> BTreeMap<&'static str, i64> {
        let mut map = BTreeMap::new();
        map.insert("signo", i64::from(self.signo));
        map.insert("errno", i64::from(self.errno));
        map.insert("code", i64::from(self.code));
        if let Some(pid) = self.pid {
            map.insert("pid", i64::from(pid));
        }
        if let Some(uid) = self.uid {
            map.insert("uid", i64::from(uid));
        }
        if let Some(status) = self.status {
            map.insert("status", i64::from(status));
        }
        if let Some(addr) = self.addr {
            map.insert("addr", addr as i64);
        }
        map
    }

    /// Check if the signal was sent by a process rather than the kernel
    pub fn is_user_sent(&self) -> bool {
        self.code <= 0 && self.pid.is_some()
    }
}
