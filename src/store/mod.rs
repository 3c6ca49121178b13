//! The [`StateStorage`] abstraction and its adapters.

use std::any::{Any, type_name};
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

mod application;
mod cookie;
mod memory;
mod web_session;

pub use application::ApplicationState;
pub use cookie::CookieState;
pub use memory::{FakeApplicationState, FakeWebSession, MemoryState};
pub use web_session::WebSession;

/// A type-erased value held by the application, session and in-memory stores.
///
/// Values are shared, not copied, so a typed read returns exactly what was
/// written.
pub type StoredValue = Arc<dyn Any + Send + Sync>;

/// Bound for values accepted by the typed `get`/`set` operations.
///
/// The serde bounds are only exercised by [`CookieState`]; the other stores
/// keep values as they are.
pub trait StateValue: Any + Clone + Default + Send + Sync + Serialize + DeserializeOwned {}

impl<T> StateValue for T where T: Any + Clone + Default + Send + Sync + Serialize + DeserializeOwned {}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("the {0} state of the context is unavailable")]
    Unavailable(&'static str),

    #[error("the value stored at '{key}' cannot be converted to {expected}")]
    Conversion { key: String, expected: &'static str },

    #[error("'{0}' cannot be used as a cookie name")]
    InvalidName(String),

    #[error("Encoding failed with: {0}")]
    Encode(String),

    #[error("Decoding failed with: {0}")]
    Decode(String),
}

/// Key/value state over some backing store.
///
/// Reads never fail because a key, or the backing store itself, is missing:
/// they report "not found" instead. Writes fail with [`Error::Unavailable`]
/// when there is nothing to write to.
pub trait StateStorage {
    /// The untyped value returned by [`get_value`](Self::get_value).
    type Value;

    /// Removes every entry from the backing store.
    fn clear(&self);

    /// Gets the value stored at `key`, if any.
    fn get_value(&self, key: &str) -> Option<Self::Value>;

    /// Gets the value stored at `key` as a `T`.
    ///
    /// Returns `Ok(None)` when nothing is stored, and an error when the stored
    /// value is not a `T`.
    fn try_get<T: StateValue>(&self, key: &str) -> Result<Option<T>, Error>;

    /// Like [`try_get`](Self::try_get), with a missing value read as
    /// `T::default()`.
    fn get<T: StateValue>(&self, key: &str) -> Result<T, Error> {
        Ok(self.try_get(key)?.unwrap_or_default())
    }

    /// Stores `value` at `key`, replacing any previous value.
    fn set_value(&self, key: &str, value: Self::Value) -> Result<(), Error>;

    /// Typed form of [`set_value`](Self::set_value).
    fn set<T: StateValue>(&self, key: &str, value: T) -> Result<(), Error>;
}

pub(crate) fn downcast<T: StateValue>(key: &str, value: &StoredValue) -> Result<T, Error> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| Error::Conversion {
            key: key.to_string(),
            expected: type_name::<T>(),
        })
}
