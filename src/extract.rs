use std::sync::Arc;

use axum_core::extract::FromRequestParts;
use http::{StatusCode, request::Parts};

use crate::{ApplicationState, CookieState, HttpContext, WebSession};

fn http_context(parts: &Parts) -> Result<Arc<HttpContext>, (StatusCode, &'static str)> {
    parts
        .extensions
        .get::<Arc<HttpContext>>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("state layer not found in the request extensions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "state context not found in the request",
            )
        })
}

macro_rules! impl_from_request_parts {
    ($($adapter:ty),+ $(,)?) => {
        $(
            /// Axum Extractor, built from the context the
            /// [`StateLayer`](crate::StateLayer) attached to the request.
            impl<S> FromRequestParts<S> for $adapter
            where
                S: Send + Sync,
            {
                type Rejection = (StatusCode, &'static str);

                async fn from_request_parts(
                    parts: &mut Parts,
                    _state: &S,
                ) -> Result<Self, Self::Rejection> {
                    http_context(parts).map(<$adapter>::new)
                }
            }
        )+
    };
}

impl_from_request_parts!(ApplicationState, WebSession, CookieState);
