//! Callback-style completion
//!
//! The client resolves every call through a single future. Callers that
//! prefer completion callbacks adapt at this boundary: the future is spawned
//! on the tokio runtime and the callback runs exactly once with its result.
//! If the task is aborted or torn down first, the callback still runs, with
//! [`RestError::Cancelled`].

use std::future::Future;
use std::marker::PhantomData;

use tokio::task::JoinHandle;

use crate::error::{RestError, RestResult};

/// Owns a pending callback and fires it exactly once
struct CallbackGuard<T, F>
where
    F: FnOnce(RestResult<T>),
{
    callback: Option<F>,
    _result: PhantomData<fn(T)>,
}

impl<T, F> CallbackGuard<T, F>
where
    F: FnOnce(RestResult<T>),
{
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
            _result: PhantomData,
        }
    }

    fn complete(mut self, result: RestResult<T>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<T, F> Drop for CallbackGuard<T, F>
where
    F: FnOnce(RestResult<T>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(Err(RestError::Cancelled));
        }
    }
}

/// Drive `future` in the background and hand its result to `callback`
///
/// Must be called from within a tokio runtime. Aborting the returned handle
/// before the future completes cancels the request; the callback then
/// receives [`RestError::Cancelled`].
pub fn spawn_with_callback<T, Fut, F>(future: Fut, callback: F) -> JoinHandle<()>
where
    T: Send + 'static,
    Fut: Future<Output = RestResult<T>> + Send + 'static,
    F: FnOnce(RestResult<T>) + Send + 'static,
{
    let guard = CallbackGuard::new(callback);

    tokio::spawn(async move {
        let result = future.await;
        guard.complete(result);
    })
}
