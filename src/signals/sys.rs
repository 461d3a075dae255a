/*!
 * Signal System Calls
 * Thin wrappers over kill(2), raise(3) and sigaction(2)
 *
 * Signal numbering follows Linux. Other targets build, but every call
 * reports ENOSYS.
 */

use crate::core::types::Pid;
use nix::errno::Errno;

#[cfg(target_os = "linux")]
pub(crate) use imp::{install_default, install_ignore, install_trampoline, kill, raise};

#[cfg(not(target_os = "linux"))]
pub(crate) use fallback::{install_default, install_ignore, install_trampoline, kill, raise};

#[cfg(target_os = "linux")]
mod imp {
    use super::*;
    use crate::signals::callbacks;
    use crate::signals::siginfo::SigInfo;
    use crate::signals::types::Signal;
    use libc::{c_int, c_void, siginfo_t};
    use nix::sys::signal::SigSet;
    use std::{mem, ptr};

    // Linux si_code values for process-originated signals
    const SI_USER: c_int = 0;
    const SI_QUEUE: c_int = -1;
    const SI_TKILL: c_int = -6;

    type SigactionFn = extern "C" fn(c_int, *mut siginfo_t, *mut c_void);

    pub(crate) fn kill(pid: Pid, signo: i32) -> nix::Result<()> {
        // SAFETY: kill(2) has no memory-safety preconditions
        Errno::result(unsafe { libc::kill(pid, signo) }).map(drop)
    }

    pub(crate) fn raise(signo: i32) -> nix::Result<()> {
        // SAFETY: raise(3) has no memory-safety preconditions
        Errno::result(unsafe { libc::raise(signo) }).map(drop)
    }

    pub(crate) fn install_trampoline(signo: i32, restart_syscalls: bool) -> nix::Result<()> {
        let mut flags = libc::SA_SIGINFO;
        if restart_syscalls {
            flags |= libc::SA_RESTART;
        }
        set_action(signo, trampoline as SigactionFn as libc::sighandler_t, flags)
    }

    pub(crate) fn install_default(signo: i32) -> nix::Result<()> {
        set_action(signo, libc::SIG_DFL, 0)
    }

    pub(crate) fn install_ignore(signo: i32) -> nix::Result<()> {
        set_action(signo, libc::SIG_IGN, 0)
    }

    fn set_action(signo: i32, handler: libc::sighandler_t, flags: c_int) -> nix::Result<()> {
        // SAFETY: an all-zero sigaction is a valid value; the fields the
        // kernel reads are filled in below
        let mut action: libc::sigaction = unsafe { mem::zeroed() };
        action.sa_sigaction = handler;
        action.sa_flags = flags;
        action.sa_mask = *SigSet::empty().as_ref();

        // SAFETY: `action` is fully initialised and the old action is not requested
        Errno::result(unsafe { libc::sigaction(signo, &action, ptr::null_mut()) }).map(drop)
    }

    /// Entry point the kernel calls for every signal we own
    extern "C" fn trampoline(signo: c_int, info: *mut siginfo_t, _context: *mut c_void) {
        let saved_errno = Errno::last_raw();

        if let Ok(signal) = Signal::from_value(signo) {
            // SAFETY: with SA_SIGINFO the kernel passes a valid siginfo_t
            let info = unsafe { read_siginfo(signo, info) };
            callbacks::dispatch(signal, &info);
        }

        Errno::set_raw(saved_errno);
    }

    unsafe fn read_siginfo(signo: c_int, info: *const siginfo_t) -> SigInfo {
        let mut out = SigInfo {
            signo,
            ..SigInfo::default()
        };
        let Some(raw) = info.as_ref() else {
            return out;
        };

        out.signo = raw.si_signo;
        out.errno = raw.si_errno;
        out.code = raw.si_code;

        match raw.si_code {
            code if code > 0 && signo == libc::SIGCHLD => {
                out.pid = Some(raw.si_pid());
                out.uid = Some(raw.si_uid());
                out.status = Some(raw.si_status());
            }
            code if code > 0
                && matches!(
                    signo,
                    libc::SIGILL | libc::SIGFPE | libc::SIGSEGV | libc::SIGBUS
                ) =>
            {
                out.addr = Some(raw.si_addr() as usize);
            }
            SI_USER | SI_QUEUE | SI_TKILL => {
                out.pid = Some(raw.si_pid());
                out.uid = Some(raw.si_uid());
            }
            _ => {}
        }
        out
    }
}

#[cfg(not(target_os = "linux"))]
mod fallback {
    use super::*;

    pub(crate) fn kill(_pid: Pid, _signo: i32) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    pub(crate) fn raise(_signo: i32) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    pub(crate) fn install_trampoline(_signo: i32, _restart_syscalls: bool) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    pub(crate) fn install_default(_signo: i32) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    pub(crate) fn install_ignore(_signo: i32) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }
}
