//! In-flight request coalescing
//!
//! When several tasks ask for the same subject (typically a movie id) at once,
//! only the first one starts an outbound call; the rest await the same shared
//! outcome. The registration is removed as soon as that outcome settles, so a
//! later caller always starts fresh.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::debug;

use crate::error::ApiResult;

/// A pending outcome that any number of callers may await.
pub type PendingFuture<T> = Shared<BoxFuture<'static, ApiResult<T>>>;

type PendingMap<T> = HashMap<String, PendingFuture<T>>;

/// Map of subject id to the in-flight call for that subject.
pub struct PendingRequests<T> {
    inflight: Arc<Mutex<PendingMap<T>>>,
}

impl<T> Default for PendingRequests<T> {
    fn default() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

fn lock<T>(map: &Mutex<PendingMap<T>>) -> MutexGuard<'_, PendingMap<T>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> PendingRequests<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the in-flight call for `subject`, or start one with `start`.
    ///
    /// The lookup and the registration happen under a single lock guard with
    /// no `.await` in between, so two callers can never both start a call for
    /// the same subject. `start` runs while the guard is held and must not
    /// call back into this map.
    pub fn get_or_start<F, Fut>(&self, subject: &str, start: F) -> PendingFuture<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let mut inflight = lock(&self.inflight);

        if let Some(pending) = inflight.get(subject) {
            debug!("Joining in-flight request for {}", subject);
            return pending.clone();
        }

        let registry = Arc::clone(&self.inflight);
        let key = subject.to_string();
        let call = start();

        let pending = async move {
            let outcome = call.await;
            lock(&registry).remove(&key);
            outcome
        }
        .boxed()
        .shared();

        inflight.insert(subject.to_string(), pending.clone());
        pending
    }

    /// Number of subjects with a call in flight.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        lock(&self.inflight).len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
