//! Cart domain module.
//!
//! - [`Cart`]: the selection itself, an aggregate over product ids.
//! - [`CartStorage`]: the key/value seam the cart is persisted through.
//! - [`CartStore`]: owns both and writes through on every mutation.
//!
//! Persistence is best-effort: read and write failures are logged and the
//! cart degrades to empty (on load) or unpersisted (on save).

pub mod cart;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use cart::{Cart, CartCommand, CartEvent};
pub use snapshot::CartSnapshot;
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
