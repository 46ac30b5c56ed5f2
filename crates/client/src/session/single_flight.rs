//! Single-flight coalescing for fallible async operations

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::sync::Mutex;

type SharedAttempt<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

/// Collapses concurrent invocations of one operation into a single
/// in-flight attempt whose outcome every caller observes.
///
/// The slot is checked and set under the lock within one task turn; the
/// lock is never held across an await.
pub struct SingleFlight<T, E> {
    slot: Mutex<Option<SharedAttempt<T, E>>>,
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Join the in-flight attempt, or start a new one with `make`.
    ///
    /// The slot is cleared once the attempt completes, so the next call
    /// after completion starts a fresh attempt.
    pub async fn run<F>(&self, make: F) -> Result<T, E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, E>>,
    {
        let attempt = {
            let mut slot = self.slot.lock().expect("single-flight slot poisoned");
            if let Some(attempt) = slot.as_ref() {
                attempt.clone()
            } else {
                let attempt = make().shared();
                *slot = Some(attempt.clone());
                attempt
            }
        };

        let result = attempt.clone().await;

        let mut slot = self.slot.lock().expect("single-flight slot poisoned");
        if slot
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&attempt))
        {
            *slot = None;
        }

        result
    }
}

impl<T, E> Default for SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
