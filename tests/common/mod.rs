#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use statebag::cookie::CookieJar;
use statebag::{CookieOptions, HttpContext, StateMap};
use std::sync::Arc;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestUser {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestSession {
    pub user: TestUser,
    pub preferences: TestPreferences,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestPreferences {
    pub theme: String,
    pub language: String,
}

pub fn create_test_session() -> TestSession {
    TestSession {
        user: TestUser {
            id: 1,
            name: "Test User".to_string(),
        },
        preferences: TestPreferences {
            theme: "dark".to_string(),
            language: "en".to_string(),
        },
    }
}

/// A context with every scope available.
pub fn full_context() -> Arc<HttpContext> {
    Arc::new(
        HttpContext::build()
            .with_application(Arc::new(StateMap::new()))
            .with_session(Arc::new(StateMap::new()))
            .with_cookies(CookieJar::new()),
    )
}

pub fn build_cookie_options() -> CookieOptions {
    CookieOptions::build()
        .name("test_sid")
        .http_only(true)
        .same_site(statebag::cookie::SameSite::Lax)
        .secure(true)
        .max_age(15)
        .path("/")
}
