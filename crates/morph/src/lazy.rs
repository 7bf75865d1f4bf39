use morph_core::{Error, Result};
use parking_lot::ReentrantMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Serializes first-time configuration across the process.
///
/// Configuring one mapper may configure others (nested adapters, enum
/// mappers), so the lock is re-entrant and shared: two threads configuring
/// adapters that depend on each other cannot deadlock.
static CONFIGURE: ReentrantMutex<()> = parking_lot::const_reentrant_mutex(());

/// A value configured at most once, on first use.
///
/// The outcome is cached whether it succeeds or fails, so every caller sees
/// the same `Arc` or the same error.
pub(crate) struct Lazy<C> {
    cell: OnceLock<Result<Arc<C>>>,
    configuring: AtomicBool,
}

impl<C> Lazy<C> {
    pub(crate) const fn new() -> Lazy<C> {
        Lazy {
            cell: OnceLock::new(),
            configuring: AtomicBool::new(false),
        }
    }

    /// Returns the configured value, running `configure` if this is the first
    /// call.
    ///
    /// `subject` names the mapper in the error returned when `configure`
    /// ends up asking for this same value.
    pub(crate) fn get_or_configure(
        &self,
        subject: impl FnOnce() -> String,
        configure: impl FnOnce() -> Result<C>,
    ) -> Result<Arc<C>> {
        if let Some(result) = self.cell.get() {
            return result.clone();
        }

        let _guard = CONFIGURE.lock();

        if let Some(result) = self.cell.get() {
            return result.clone();
        }

        if self.configuring.swap(true, Ordering::AcqRel) {
            return Err(Error::reentrant_configuration(subject()));
        }

        let result = {
            let _reset = ResetOnDrop(&self.configuring);
            configure().map(Arc::new)
        };

        self.cell.get_or_init(|| result).clone()
    }

    /// Returns `true` while `configure` is running.
    pub(crate) fn is_configuring(&self) -> bool {
        self.configuring.load(Ordering::Acquire)
    }
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn configures_once() {
        let lazy = Lazy::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = lazy
                .get_or_configure(String::new, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn caches_failure() {
        let lazy = Lazy::<i32>::new();

        let first = lazy
            .get_or_configure(String::new, || Err(morph_core::err!("nope")))
            .unwrap_err();
        let second = lazy
            .get_or_configure(String::new, || Ok(1))
            .unwrap_err();

        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn detects_reentrant_configuration() {
        let lazy = Lazy::<i32>::new();

        let err = lazy
            .get_or_configure(String::new, || {
                assert!(lazy.is_configuring());
                lazy.get_or_configure(|| "inner".to_string(), || Ok(1))
                    .map(|v| *v)
            })
            .unwrap_err();

        assert!(err.is_reentrant_configuration());
        assert!(!lazy.is_configuring());
    }

    #[test]
    fn concurrent_first_use_shares_one_value() {
        let lazy = Arc::new(Lazy::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = lazy.clone();
                let calls = calls.clone();
                std::thread::spawn(move || {
                    lazy.get_or_configure(String::new, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(String::from("compiled"))
                    })
                    .unwrap()
                })
            })
            .collect();

        let values: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
