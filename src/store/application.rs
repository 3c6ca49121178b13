use std::sync::Arc;

use crate::HttpContext;
use crate::store::{Error, StateStorage, StateValue, StoredValue, downcast};

/// State shared by every request of the application.
///
/// Reads and writes go straight to the context's application map.
#[derive(Clone, Debug)]
pub struct ApplicationState {
    context: Arc<HttpContext>,
}

impl ApplicationState {
    pub fn new(context: Arc<HttpContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &HttpContext {
        &self.context
    }
}

impl StateStorage for ApplicationState {
    type Value = StoredValue;

    #[tracing::instrument(name = "clearing application state", skip(self))]
    fn clear(&self) {
        match self.context.application() {
            Some(map) => map.clear(),
            None => tracing::debug!("application state unavailable, nothing to clear"),
        }
    }

    fn get_value(&self, key: &str) -> Option<StoredValue> {
        self.context.application()?.get(key)
    }

    #[tracing::instrument(name = "getting value from application state", skip(self))]
    fn try_get<T: StateValue>(&self, key: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.get_value(key) else {
            return Ok(None);
        };

        downcast(key, &value).map(Some).map_err(|err| {
            tracing::error!(err = %err, "failed to read application state");
            err
        })
    }

    #[tracing::instrument(name = "setting value in application state", skip(self, value))]
    fn set_value(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        let map = self.context.application().ok_or_else(|| {
            tracing::error!("the application state of the context is unavailable");
            Error::Unavailable("application")
        })?;

        map.insert(key, value);
        Ok(())
    }

    fn set<T: StateValue>(&self, key: &str, value: T) -> Result<(), Error> {
        self.set_value(key, Arc::new(value))
    }
}
