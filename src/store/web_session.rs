use std::sync::Arc;

use crate::HttpContext;
use crate::store::{Error, StateStorage, StateValue, StoredValue, downcast};

/// State private to one user's session.
///
/// Writes fail with [`Error::Unavailable`] when the context carries no session,
/// e.g. when the [`StateLayer`](crate::StateLayer) was built without one.
#[derive(Clone, Debug)]
pub struct WebSession {
    context: Arc<HttpContext>,
}

impl WebSession {
    pub fn new(context: Arc<HttpContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &HttpContext {
        &self.context
    }
}

impl StateStorage for WebSession {
    type Value = StoredValue;

    #[tracing::instrument(name = "clearing session state", skip(self))]
    fn clear(&self) {
        match self.context.session() {
            Some(map) => map.clear(),
            None => tracing::debug!("session state unavailable, nothing to clear"),
        }
    }

    fn get_value(&self, key: &str) -> Option<StoredValue> {
        self.context.session()?.get(key)
    }

    #[tracing::instrument(name = "getting value from session", skip(self))]
    fn try_get<T: StateValue>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get_value(key) {
            Some(value) => downcast(key, &value).map(Some).map_err(|err| {
                tracing::error!(err = %err, "failed to read session value");
                err
            }),
            None => {
                tracing::debug!("no session value");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "setting value in session", skip(self, value))]
    fn set_value(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        let Some(map) = self.context.session() else {
            tracing::error!("the session state of the context is unavailable");
            return Err(Error::Unavailable("session"));
        };

        map.insert(key, value);
        Ok(())
    }

    fn set<T: StateValue>(&self, key: &str, value: T) -> Result<(), Error> {
        self.set_value(key, Arc::new(value))
    }
}
