use std::sync::Arc;

use cookie::time::OffsetDateTime;
use cookie::{Cookie, CookieJar};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::HttpContext;
use crate::store::{Error, StateStorage, StateValue};

/// State kept in the browser as JSON-encoded cookies, one cookie per key.
///
/// Reads see incoming cookies and anything written earlier in the same
/// request. Writes go to the outgoing cookies; an outgoing cookie that already
/// exists for the key is updated rather than duplicated.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use statebag::{CookieState, HttpContext, StateStorage};
/// use statebag::cookie::CookieJar;
///
/// let context = Arc::new(HttpContext::build().with_cookies(CookieJar::new()));
/// let state = CookieState::new(context);
///
/// state.set("theme", String::from("dark")).unwrap();
/// assert_eq!(state.get::<String>("theme").unwrap(), "dark");
/// ```
#[derive(Clone, Debug)]
pub struct CookieState {
    context: Arc<HttpContext>,
    expires: Option<OffsetDateTime>,
}

impl CookieState {
    /// Creates a cookie store whose cookies last for the browser session.
    pub fn new(context: Arc<HttpContext>) -> Self {
        Self {
            context,
            expires: None,
        }
    }

    /// Creates a cookie store whose cookies expire at `expires`.
    pub fn with_expiry(context: Arc<HttpContext>, expires: OffsetDateTime) -> Self {
        Self {
            context,
            expires: Some(expires),
        }
    }

    pub fn expires(&self) -> Option<OffsetDateTime> {
        self.expires
    }

    pub fn context(&self) -> &HttpContext {
        &self.context
    }

    fn payload(&self, key: &str) -> Option<String> {
        let jar = self.context.cookies()?;
        jar.get(key).map(|cookie| cookie.value().to_string())
    }

    fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, Error> {
        serde_json::from_str(payload).map_err(|err| Error::Decode(err.to_string()))
    }

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
        serde_json::to_string(value).map_err(|err| Error::Encode(err.to_string()))
    }

    fn write(&self, key: &str, payload: String) -> Result<(), Error> {
        if key.is_empty() || key.chars().any(char::is_control) {
            tracing::error!(key, "invalid cookie name");
            return Err(Error::InvalidName(key.to_string()));
        }

        let Some(mut jar) = self.context.cookies() else {
            tracing::error!("the cookies of the context are unavailable");
            return Err(Error::Unavailable("cookies"));
        };

        let cookie = match outgoing(&jar, key) {
            Some(mut existing) => {
                existing.set_value(payload);
                if let Some(expires) = self.expires {
                    existing.set_expires(expires);
                }
                existing
            }
            None => {
                let mut cookie = Cookie::build((key.to_string(), payload)).path("/");
                if let Some(expires) = self.expires {
                    cookie = cookie.expires(expires);
                }
                cookie.build()
            }
        };

        jar.add(cookie);
        Ok(())
    }
}

fn outgoing(jar: &CookieJar, key: &str) -> Option<Cookie<'static>> {
    jar.delta().find(|cookie| cookie.name() == key).cloned()
}

impl StateStorage for CookieState {
    type Value = serde_json::Value;

    /// Drops every incoming and outgoing cookie of the request.
    #[tracing::instrument(name = "clearing cookie state", skip(self))]
    fn clear(&self) {
        if let Some(mut jar) = self.context.cookies() {
            *jar = CookieJar::new();
        }
    }

    fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        let payload = self.payload(key)?;
        Self::decode(&payload)
            .map_err(|err| {
                tracing::warn!(err = %err, key, "ignoring undecodable cookie");
            })
            .ok()
    }

    #[tracing::instrument(name = "getting value from cookies", skip(self))]
    fn try_get<T: StateValue>(&self, key: &str) -> Result<Option<T>, Error> {
        let Some(payload) = self.payload(key) else {
            return Ok(None);
        };

        Self::decode(&payload).map(Some).map_err(|err| {
            tracing::error!(err = %err, "failed to decode cookie");
            err
        })
    }

    #[tracing::instrument(name = "setting cookie value", skip(self, value))]
    fn set_value(&self, key: &str, value: serde_json::Value) -> Result<(), Error> {
        let payload = Self::encode(&value)?;
        self.write(key, payload)
    }

    #[tracing::instrument(name = "setting cookie value", skip(self, value))]
    fn set<T: StateValue>(&self, key: &str, value: T) -> Result<(), Error> {
        let payload = Self::encode(&value).map_err(|err| {
            tracing::error!(err = %err, "failed to encode cookie");
            err
        })?;
        self.write(key, payload)
    }
}
