//! The per-request context the state adapters are built from.

use std::collections::HashMap;
use std::sync::Arc;

use cookie::{Cookie, CookieJar};
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::store::StoredValue;

/// A thread-safe string-keyed table of [`StoredValue`]s.
///
/// Backs the application and session scopes.
#[derive(Debug, Default)]
pub struct StateMap {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<StoredValue> {
        self.entries.read().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: StoredValue) {
        self.entries.write().insert(key.to_string(), value);
    }

    pub fn remove(&self, key: &str) -> Option<StoredValue> {
        self.entries.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Everything the state adapters read from and write to for one request.
///
/// Each scope is optional: a context without a session map behaves like a
/// host with sessions disabled.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use statebag::{HttpContext, StateMap};
/// use statebag::cookie::CookieJar;
///
/// let context = HttpContext::build()
///     .with_application(Arc::new(StateMap::new()))
///     .with_cookies(CookieJar::new());
///
/// assert!(context.application().is_some());
/// assert!(context.session().is_none());
/// ```
#[derive(Debug, Default)]
pub struct HttpContext {
    application: Option<Arc<StateMap>>,
    session: Option<Arc<StateMap>>,
    cookies: Option<Mutex<CookieJar>>,
}

impl HttpContext {
    /// Creates a context with no scopes available.
    pub fn build() -> Self {
        Self::default()
    }

    pub fn with_application(mut self, application: Arc<StateMap>) -> Self {
        self.application = Some(application);
        self
    }

    pub fn with_session(mut self, session: Arc<StateMap>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the request/response cookie pair.
    ///
    /// The jar's original cookies are the incoming ones, its delta the
    /// outgoing ones.
    pub fn with_cookies(mut self, jar: CookieJar) -> Self {
        self.cookies = Some(Mutex::new(jar));
        self
    }

    pub fn application(&self) -> Option<&StateMap> {
        self.application.as_deref()
    }

    pub fn session(&self) -> Option<&StateMap> {
        self.session.as_deref()
    }

    pub fn cookies(&self) -> Option<MutexGuard<'_, CookieJar>> {
        self.cookies.as_ref().map(|jar| jar.lock())
    }

    /// Renders the outgoing cookies as `Set-Cookie` header values.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let Some(jar) = self.cookies() else {
            return Vec::new();
        };

        jar.delta()
            .filter_map(|cookie| {
                HeaderValue::from_str(&cookie.encoded().to_string())
                    .map_err(|err| {
                        tracing::error!(
                            err = %err,
                            name = cookie.name(),
                            "cookie is not a valid header value"
                        );
                    })
                    .ok()
            })
            .collect()
    }
}

/// Builds a jar whose original cookies are those sent in `Cookie` headers.
pub fn jar_from_headers(headers: &HeaderMap) -> CookieJar {
    let mut jar = CookieJar::new();

    for header in headers.get_all(COOKIE) {
        // browsers send raw UTF-8 for cookies set by other means
        let raw = String::from_utf8_lossy(header.as_bytes());

        for cookie in Cookie::split_parse_encoded(raw.as_ref()) {
            match cookie {
                Ok(cookie) => jar.add_original(cookie.into_owned()),
                Err(err) => tracing::warn!(err = %err, "ignoring malformed cookie"),
            }
        }
    }

    jar
}
