//! Persistence collaborator: a name→snapshot store.
//!
//! Snapshots are the opaque serialized strings produced by
//! [`crate::board::Board::to_snapshot`]; the store never inspects them.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A named snapshot store. Backends may keep snapshots in memory, on
/// the filesystem, or behind a network service.
pub trait Storage: Send + Sync {
    /// Persist a snapshot under a name, replacing any previous one.
    fn save(&self, name: &str, snapshot: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Retrieve the snapshot stored under a name.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a stored snapshot. Missing names are ignored.
    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// All stored names, in no particular order.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple polling executor for tests.
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
