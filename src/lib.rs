//! # statebag: uniform key/value state for tower applications
//!
//! `statebag` puts one small interface, [`StateStorage`], in front of three
//! places a web application keeps state:
//!
//! - [`ApplicationState`]: values shared by every request.
//! - [`WebSession`]: values private to one user's session.
//! - [`CookieState`]: JSON values kept in browser cookies.
//!
//! Handlers depend on the interface; the adapter is built from the request's
//! [`HttpContext`]. [`MemoryState`] implements the same interface in memory so
//! code written against it can be tested without a request.
//!
//! The crate also carries a handful of helpers: boolean conversions
//! ([`convert`]), string manipulation ([`text`]) and parameter guards
//! ([`guard`]).
//!
//! # Quick Start
//!
//! Here's a basic example with [Axum](https://docs.rs/axum/latest/axum/).
//! This requires the `axum` feature (enabled by default).
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use statebag::{CookieOptions, StateLayer, StateStorage, WebSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Configure the session-id cookie
//!     let cookie_options = CookieOptions::build()
//!         .name("sid")
//!         .http_only(true)
//!         .same_site(statebag::cookie::SameSite::Lax)
//!         .secure(true)
//!         .path("/");
//!
//!     let app = Router::new()
//!         .route("/", get(handler))
//!         .layer(StateLayer::new().with_session(cookie_options));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//!
//! async fn handler(session: WebSession) -> String {
//!     let count = session.get::<i32>("count").unwrap() + 1;
//!     session.set("count", count).unwrap();
//!     format!("You've visited this page {} times", count)
//! }
//! ```
//!
//! # State Storage
//!
//! ```rust
//! use std::sync::Arc;
//! use statebag::{ApplicationState, HttpContext, StateMap, StateStorage};
//!
//! let context = HttpContext::build().with_application(Arc::new(StateMap::new()));
//! let state = ApplicationState::new(Arc::new(context));
//!
//! // Missing keys read as the type's default
//! assert_eq!(state.get::<u32>("hits").unwrap(), 0);
//!
//! // `try_get` keeps "not found" apart from a stored default
//! assert_eq!(state.try_get::<u32>("hits").unwrap(), None);
//!
//! state.set("hits", 1u32).unwrap();
//! assert_eq!(state.get::<u32>("hits").unwrap(), 1);
//!
//! state.clear();
//! assert!(state.get_value("hits").is_none());
//! ```
//!
//! # Important Notes
//!
//! - A [`StateLayer`] without sessions still hands out [`WebSession`]s, but
//!   writes to them fail with [`store::Error::Unavailable`].
//! - Cookie values are written as plain JSON. Keep them small and do not put
//!   secrets in them.
//! - Session state lives in process memory and is never expired.

pub use cookie;

#[cfg(feature = "axum")]
mod extract;

pub mod context;
pub use context::{HttpContext, StateMap};

pub mod convert;
pub mod guard;

mod service;
pub use service::*;

mod session;
pub use session::{CookieOptions, Id, SessionTable};

pub mod store;
pub use store::{
    ApplicationState, CookieState, FakeApplicationState, FakeWebSession, MemoryState,
    StateStorage, StateValue, StoredValue, WebSession,
};

pub mod text;
