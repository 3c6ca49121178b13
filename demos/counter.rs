use axum::{Router, routing::get};
use statebag::cookie::SameSite;
use statebag::{CookieOptions, CookieState, StateLayer, StateStorage, WebSession};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cookie_options = CookieOptions::build()
        .name("session")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .max_age(3600)
        .path("/");

    let app = Router::new()
        .route("/", get(handler))
        .layer(StateLayer::new().with_session(cookie_options));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn handler(session: WebSession, cookies: CookieState) -> String {
    let visits = session.get::<u32>("visits").unwrap_or_default() + 1;
    if let Err(err) = session.set("visits", visits) {
        tracing::error!(err = %err, "failed to store visits");
    }

    // survives server restarts, unlike the session
    let total = cookies.get::<u32>("total").unwrap_or_default() + 1;
    if let Err(err) = cookies.set("total", total) {
        tracing::error!(err = %err, "failed to store total");
    }

    format!("You've visited this page {visits} times this session and {total} times in total")
}
