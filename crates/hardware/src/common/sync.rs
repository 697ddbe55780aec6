//! Lock helpers.
//!
//! Every shared structure in the simulator is guarded by a `std::sync::Mutex`. A panic while
//! a guard is held poisons the lock; the guarded data is plain bookkeeping that stays
//! consistent at every statement boundary, so the poison flag is cleared and the data used.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the guard if the lock is poisoned.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
