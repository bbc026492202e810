//! Synchronization utilities for robust mutex handling
//!
//! This module provides utilities for handling mutex poisoning in a
//! consistent manner across the codebase.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked
///
/// Only for state that is never left half-updated inside its critical
/// sections. Recovery is logged at warn level with `context`.
pub fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poison_err: PoisonError<MutexGuard<'a, T>>| {
        log::warn!("Recovered poisoned lock ({})", context);
        poison_err.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn poisoned_mutex(value: i32) -> Arc<Mutex<i32>> {
        let mutex = Arc::new(Mutex::new(value));
        let mutex_clone = Arc::clone(&mutex);

        // Poison the mutex by panicking while holding the lock
        let _ = thread::spawn(move || {
            let _guard = mutex_clone.lock().unwrap();
            panic!("Intentional panic to poison mutex");
        })
        .join();

        mutex
    }

    #[test]
    fn test_lock_or_recover_returns_guard() {
        let mutex = Mutex::new(7);
        *lock_or_recover(&mutex, "test") += 1;
        assert_eq!(*mutex.lock().unwrap(), 8);
    }

    #[test]
    fn test_lock_or_recover_survives_poison() {
        let mutex = poisoned_mutex(10);
        assert!(mutex.is_poisoned());

        let guard = lock_or_recover(&mutex, "poison test");
        assert_eq!(*guard, 10);
    }
}
