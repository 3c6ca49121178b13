//! In-process session state keyed by a session-id cookie.

use std::sync::Arc;

use cookie::{Cookie, CookieJar};
use dashmap::DashMap;

use crate::StateMap;

mod cookie_options;
mod id;

pub use cookie_options::CookieOptions;
pub use id::Id;

/// The session maps of every live session, keyed by [`Id`].
///
/// Sessions are only ever added, when a new session is first written to.
/// There is no expiry.
#[derive(Debug)]
pub struct SessionTable {
    sessions: DashMap<Id, Arc<StateMap>>,
    cookie_options: CookieOptions,
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new(CookieOptions::default())
    }
}

impl SessionTable {
    pub fn new(cookie_options: CookieOptions) -> Self {
        Self {
            sessions: DashMap::new(),
            cookie_options,
        }
    }

    pub fn cookie_options(&self) -> &CookieOptions {
        &self.cookie_options
    }

    pub fn get(&self, id: &Id) -> Option<Arc<StateMap>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, id: &Id) -> Option<Arc<StateMap>> {
        self.sessions.remove(id).map(|(_, map)| map)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Finds the session named by the request's session cookie, or starts a
    /// new, not yet stored, one.
    #[tracing::instrument(name = "resolving session", skip_all)]
    pub(crate) fn resolve(self: &Arc<Self>, jar: &CookieJar) -> PendingSession {
        let id = jar
            .get(self.cookie_options.name)
            .map(Cookie::value)
            .and_then(|value| {
                value
                    .parse::<Id>()
                    .map_err(|err| {
                        tracing::warn!(
                            err = %err,
                            "possibly suspicious activity: malformed session id"
                        )
                    })
                    .ok()
            });

        if let Some(id) = id {
            if let Some(map) = self.get(&id) {
                return PendingSession {
                    table: Arc::clone(self),
                    id,
                    map,
                    is_new: false,
                };
            }
            tracing::debug!("unknown session id, starting a new session");
        }

        PendingSession {
            table: Arc::clone(self),
            id: Id::default(),
            map: Arc::new(StateMap::new()),
            is_new: true,
        }
    }
}

/// The session of one in-flight request.
#[derive(Debug)]
pub(crate) struct PendingSession {
    table: Arc<SessionTable>,
    id: Id,
    map: Arc<StateMap>,
    is_new: bool,
}

impl PendingSession {
    pub(crate) fn map(&self) -> Arc<StateMap> {
        Arc::clone(&self.map)
    }

    /// Stores a new session that was written to and returns the cookie that
    /// carries its id. Existing or untouched sessions need no cookie.
    pub(crate) fn commit(self) -> Option<Cookie<'static>> {
        if !self.is_new || self.map.is_empty() {
            return None;
        }

        tracing::debug!("storing new session");
        self.table.sessions.insert(self.id, self.map);
        Some(self.table.cookie_options.to_cookie(self.id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar_with(name: &'static str, value: String) -> CookieJar {
        let mut jar = CookieJar::new();
        jar.add_original(Cookie::new(name, value));
        jar
    }

    #[test]
    fn test_new_session_stored_on_first_write() {
        let table = Arc::new(SessionTable::default());

        let untouched = table.resolve(&CookieJar::new());
        assert!(untouched.commit().is_none());
        assert!(table.is_empty());

        let pending = table.resolve(&CookieJar::new());
        pending.map().insert("user", Arc::new(7i64));
        let cookie = pending.commit().unwrap();
        assert_eq!(cookie.name(), "sid");
        assert_eq!(table.len(), 1);

        let id: Id = cookie.value().parse().unwrap();
        let map = table.get(&id).unwrap();
        assert_eq!(map.get("user").unwrap().downcast_ref::<i64>(), Some(&7));
    }

    #[test]
    fn test_existing_session_resolved() {
        let table = Arc::new(SessionTable::new(CookieOptions::build().name("test_sid")));
        let pending = table.resolve(&CookieJar::new());
        pending.map().insert("a", Arc::new(1i32));
        let cookie = pending.commit().unwrap();

        let again = table.resolve(&jar_with("test_sid", cookie.value().to_string()));
        assert!(again.map().contains_key("a"));
        assert!(again.commit().is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_malformed_or_unknown_id() {
        let table = Arc::new(SessionTable::default());

        let pending = table.resolve(&jar_with("sid", "invalid_session_id".to_string()));
        assert!(pending.map().is_empty());

        let pending = table.resolve(&jar_with("sid", Id::default().to_string()));
        assert!(pending.map().is_empty());
        assert!(table.remove(&Id::default()).is_none());
    }
}
