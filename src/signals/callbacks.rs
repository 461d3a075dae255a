/*!
 * Signal Callback Table
 * Holds the Rust handlers the kernel cannot hold itself
 *
 * The delivery side only does atomic loads and counter updates. Entries
 * that get replaced are parked and freed later from normal context, once
 * no delivery is running.
 */

use super::handler::HandlerRef;
use super::siginfo::SigInfo;
use super::types::{Signal, MAX_SIGNAL};
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

const SLOT_COUNT: usize = MAX_SIGNAL as usize + 1;

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: AtomicPtr<HandlerRef> = AtomicPtr::new(ptr::null_mut());

/// One slot per signal number, indexed by value
///
/// A non-null slot owns a leaked `Box<HandlerRef>`; the box keeps the
/// pointer thin enough for `AtomicPtr`.
static SLOTS: [AtomicPtr<HandlerRef>; SLOT_COUNT] = [EMPTY_SLOT; SLOT_COUNT];

/// Deliveries currently inside `dispatch`
static IN_FLIGHT: AtomicUsize = AtomicUsize::new(0);

/// Replaced entries waiting for a moment with no delivery in flight
static RETIRED: Mutex<Vec<Box<HandlerRef>>> = Mutex::new(Vec::new());

#[inline]
fn slot(signal: Signal) -> &'static AtomicPtr<HandlerRef> {
    &SLOTS[signal.value() as usize]
}

/// Swap in a new handler, returning the one it replaced
///
/// Normal context only. The replaced slot entry is parked, not freed.
pub(crate) fn replace(signal: Signal, handler: Option<HandlerRef>) -> Option<HandlerRef> {
    let fresh = handler.map_or(ptr::null_mut(), |h| Box::into_raw(Box::new(h)));
    let old = slot(signal).swap(fresh, Ordering::SeqCst);

    let old = if old.is_null() {
        None
    } else {
        // SAFETY: non-null slot values come from Box::into_raw above, and the
        // swap made this call their only owner.
        Some(unsafe { Box::from_raw(old) })
    };
    let previous = old.as_deref().cloned();
    park(old);
    previous
}

/// Park a replaced entry and free everything parked if nothing is in flight
fn park(entry: Option<Box<HandlerRef>>) {
    let reclaimed = {
        let mut retired = RETIRED.lock().unwrap_or_else(PoisonError::into_inner);
        retired.extend(entry);
        // A delivery that starts after this load sees the swapped slot
        if IN_FLIGHT.load(Ordering::SeqCst) == 0 {
            mem::take(&mut *retired)
        } else {
            Vec::new()
        }
    };
    // User drop code runs outside the lock
    drop(reclaimed);
}

#[cfg(test)]
fn is_stored(signal: Signal) -> bool {
    !slot(signal).load(Ordering::SeqCst).is_null()
}

#[cfg(test)]
fn parked() -> usize {
    RETIRED.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// Run the stored handler, if any
///
/// Called from the delivery trampoline. Must not log, lock or allocate.
/// Returns false when nothing was stored.
pub(crate) fn dispatch(signal: Signal, info: &SigInfo) -> bool {
    IN_FLIGHT.fetch_add(1, Ordering::SeqCst);
    let entry = slot(signal).load(Ordering::SeqCst);

    // SAFETY: entries loaded while IN_FLIGHT is raised are parked on
    // replacement and not freed until the count drops back to zero.
    let handled = match unsafe { entry.as_ref() } {
        Some(handler) => {
            handler.handle(signal, info);
            true
        }
        None => false,
    };

    IN_FLIGHT.fetch_sub(1, Ordering::SeqCst);
    handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Arc;

    #[test]
    #[serial]
    fn test_replace_and_dispatch() {
        // SIGRTMAX-7 is not touched by any other test in this crate
        let signal = Signal::SIGRTMAX_7;
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        assert!(!dispatch(signal, &SigInfo::default()));

        let previous = replace(
            signal,
            Some(Arc::new(move |_: Signal, _: &SigInfo| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );
        assert!(previous.is_none());
        assert!(is_stored(signal));

        assert!(dispatch(signal, &SigInfo::default()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(replace(signal, None).is_some());
        assert!(!is_stored(signal));
        assert_eq!(parked(), 0);
    }

    #[test]
    #[serial]
    fn test_replaced_entry_outlives_running_delivery() {
        let signal = Signal::SIGRTMAX_6;
        let handler: HandlerRef = Arc::new(|_: Signal, _: &SigInfo| {});
        replace(signal, Some(Arc::clone(&handler)));
        assert_eq!(Arc::strong_count(&handler), 2);

        // Stand in for a delivery that is still running the old handler
        IN_FLIGHT.fetch_add(1, Ordering::SeqCst);
        drop(replace(signal, None));
        assert_eq!(Arc::strong_count(&handler), 2);
        assert_eq!(parked(), 1);
        IN_FLIGHT.fetch_sub(1, Ordering::SeqCst);

        // The next replacement from normal context frees what was parked
        assert!(replace(signal, None).is_none());
        assert_eq!(Arc::strong_count(&handler), 1);
        assert_eq!(parked(), 0);
    }
}
