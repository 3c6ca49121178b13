//! State middleware for tower applications.
//!
//! This module provides [`StateLayer`], which gives every request an
//! [`HttpContext`] the state adapters can be built from.

use http::header::SET_COOKIE;
use http::{HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use tower::{Layer, Service};

use crate::session::{PendingSession, SessionTable};
use crate::{CookieOptions, HttpContext, StateMap, context};

/// A Tower Middleware that attaches an `Arc<HttpContext>` to each request.
#[derive(Clone, Debug)]
pub struct StateService<S> {
    inner: S,
    application: Arc<StateMap>,
    sessions: Option<Arc<SessionTable>>,
}

impl<ReqBody, ResBody, S> Service<Request<ReqBody>> for StateService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let jar = context::jar_from_headers(req.headers());
        let session = self.sessions.as_ref().map(|table| table.resolve(&jar));

        let mut http_context = HttpContext::build()
            .with_application(Arc::clone(&self.application))
            .with_cookies(jar);
        if let Some(session) = &session {
            http_context = http_context.with_session(session.map());
        }

        let http_context = Arc::new(http_context);
        req.extensions_mut().insert(Arc::clone(&http_context));

        ResponseFuture {
            future: self.inner.call(req),
            http_context,
            session,
        }
    }
}

/// Layer to apply [`StateService`] middleware.
///
/// Application state is shared by every request that passes through the
/// layer. Session state is off unless enabled with
/// [`with_session`](Self::with_session).
///
/// # Example
///
/// ```rust
/// use statebag::{CookieOptions, StateLayer};
///
/// let cookie_options = CookieOptions::build()
///         .name("app_sid")
///         .http_only(true)
///         .same_site(statebag::cookie::SameSite::Lax)
///         .secure(true)
///         .path("/");
///
/// let state_layer = StateLayer::new().with_session(cookie_options);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateLayer {
    application: Arc<StateMap>,
    sessions: Option<Arc<SessionTable>>,
}

impl StateLayer {
    /// Create a new state layer with its own application state and no
    /// sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing application state map.
    pub fn with_application(mut self, application: Arc<StateMap>) -> Self {
        self.application = application;
        self
    }

    /// Enable sessions, tracked with a cookie built from `options`.
    pub fn with_session(self, options: CookieOptions) -> Self {
        self.with_session_table(Arc::new(SessionTable::new(options)))
    }

    /// Enable sessions backed by an existing table.
    pub fn with_session_table(mut self, table: Arc<SessionTable>) -> Self {
        self.sessions = Some(table);
        self
    }

    /// Disable sessions; [`WebSession`](crate::WebSession) writes will fail.
    pub fn without_session(mut self) -> Self {
        self.sessions = None;
        self
    }

    pub fn application(&self) -> &Arc<StateMap> {
        &self.application
    }

    pub fn sessions(&self) -> Option<&Arc<SessionTable>> {
        self.sessions.as_ref()
    }
}

impl<S> Layer<S> for StateLayer {
    type Service = StateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        StateService {
            inner,
            application: Arc::clone(&self.application),
            sessions: self.sessions.clone(),
        }
    }
}

pin_project! {
    /// Response future for [`StateService`].
    #[derive(Debug)]
    pub struct ResponseFuture<F> {
        #[pin]
        future: F,
        http_context: Arc<HttpContext>,
        session: Option<PendingSession>,
    }
}

impl<F, Body, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<Body>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut res = ready!(this.future.poll(cx)?);

        let headers = res.headers_mut();
        for value in this.http_context.set_cookie_headers() {
            headers.append(SET_COOKIE, value);
        }

        if let Some(cookie) = this.session.take().and_then(PendingSession::commit) {
            match HeaderValue::from_str(&cookie.encoded().to_string()) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(err) => tracing::error!(err = %err, "failed to write session cookie"),
            }
        }

        Poll::Ready(Ok(res))
    }
}
