mod common;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::Request,
        http::{self, HeaderValue, StatusCode},
        routing::get,
    };
    use common::*;
    use http::header::{COOKIE, SET_COOKIE};
    use statebag::{ApplicationState, CookieState, StateLayer, StateStorage, WebSession};
    use tower::ServiceExt;

    async fn set_user_handler(session: WebSession) -> Result<String, StatusCode> {
        let user = TestUser {
            id: 1,
            name: "Test".to_string(),
        };
        session
            .set("user", user)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok("Success".to_string())
    }

    async fn get_user_handler(session: WebSession) -> Result<String, StatusCode> {
        let user: Option<TestUser> = session
            .try_get("user")
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(user
            .map(|u| u.name)
            .unwrap_or_else(|| "Not found".to_string()))
    }

    async fn hits_handler(application: ApplicationState) -> Result<String, StatusCode> {
        let hits = application
            .get::<u64>("hits")
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            + 1;
        application
            .set("hits", hits)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(hits.to_string())
    }

    async fn counter_handler(cookies: CookieState) -> Result<String, StatusCode> {
        let count = cookies
            .get::<i32>("count")
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            + 1;
        cookies
            .set("count", count)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(count.to_string())
    }

    async fn set_note_handler(cookies: CookieState, note: String) -> StatusCode {
        match cookies.set("note", note) {
            Ok(()) => StatusCode::OK,
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    async fn get_note_handler(cookies: CookieState) -> Result<String, StatusCode> {
        cookies
            .get::<String>("note")
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
    }

    async fn clear_cookies_handler(cookies: CookieState) -> String {
        cookies.clear();
        let count = cookies.get::<i32>("count").unwrap_or_default();
        count.to_string()
    }

    fn create_test_app() -> Router {
        Router::new()
            .route("/set", get(set_user_handler))
            .route("/get", get(get_user_handler))
            .route("/hits", get(hits_handler))
            .route("/counter", get(counter_handler))
            .route("/clear", get(clear_cookies_handler))
            .route("/note", get(get_note_handler).post(set_note_handler))
            .layer(StateLayer::new().with_session(build_cookie_options()))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let builder = Request::builder().uri(uri);
        let builder = match cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_new_session_sets_cookie() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/set", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Verify Set-Cookie header exists and has correct attributes
        let cookie_header = response
            .headers()
            .get(SET_COOKIE)
            .expect("Set-Cookie header should be present");

        let cookie_str = cookie_header.to_str().unwrap();
        assert!(cookie_str.contains("test_sid="));
        assert!(cookie_str.contains("HttpOnly"));
        assert!(cookie_str.contains("Secure"));
        assert!(cookie_str.contains("SameSite=Lax"));
        assert!(cookie_str.contains("Max-Age=15"));
    }

    #[tokio::test]
    async fn test_read_only_request_sets_no_cookie() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/get", None)).await.unwrap();
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, "Not found");
    }

    #[tokio::test]
    async fn test_session_survives_across_requests() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/set", None))
            .await
            .unwrap();

        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("Set-Cookie header should be present")
            .to_str()
            .unwrap()
            .to_string();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = app
            .oneshot(get_request("/get", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // an existing session is not re-announced
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, "Test");
    }

    #[tokio::test]
    async fn test_malformed_session_id() {
        let app = create_test_app();

        let response = app
            .oneshot(get_request("/get", Some("test_sid=invalid_session_id")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Not found");
    }

    #[tokio::test]
    async fn test_application_state_is_shared() {
        let app = create_test_app();

        for expected in 1..=3 {
            let response = app
                .clone()
                .oneshot(get_request("/hits", None))
                .await
                .unwrap();
            assert_eq!(body_string(response).await, expected.to_string());
        }
    }

    #[tokio::test]
    async fn test_cookie_state_round_trip() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/counter", None))
            .await
            .unwrap();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("Set-Cookie header should be present")
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(set_cookie, "count=1; Path=/");
        assert_eq!(body_string(response).await, "1");

        let response = app
            .oneshot(get_request("/counter", Some("count=1")))
            .await
            .unwrap();
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert_eq!(set_cookie, "count=2; Path=/");
        assert_eq!(body_string(response).await, "2");
    }

    fn first_set_cookie_pair(response: &axum::response::Response) -> String {
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("Set-Cookie header should be present")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_cookie_text_survives_round_trip() {
        let app = create_test_app();

        for note in ["a;b", "Jos\u{e9}", "quote \" and, comma", "{\"k\":\"v\"}"] {
            let request = Request::builder()
                .method("POST")
                .uri("/note")
                .body(Body::from(note))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let cookie = first_set_cookie_pair(&response);
            assert!(cookie.is_ascii());

            let response = app
                .clone()
                .oneshot(get_request("/note", Some(&cookie)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_string(response).await, note);
        }
    }

    #[tokio::test]
    async fn test_session_survives_raw_utf8_cookie() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/set", None))
            .await
            .unwrap();
        let session_cookie = first_set_cookie_pair(&response);

        // a cookie set outside this crate, sent back as raw UTF-8
        let header = format!("note=\"Jos\u{e9}\"; {session_cookie}");
        let request = Request::builder()
            .uri("/get")
            .header(COOKIE, HeaderValue::from_bytes(header.as_bytes()).unwrap())
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Test");

        let request = Request::builder()
            .uri("/note")
            .header(COOKIE, HeaderValue::from_bytes(header.as_bytes()).unwrap())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "Jos\u{e9}");
    }

    #[tokio::test]
    async fn test_cookie_clear() {
        let app = create_test_app();

        let response = app
            .oneshot(get_request("/clear", Some("count=5")))
            .await
            .unwrap();
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, "0");
    }

    #[tokio::test]
    async fn test_sessions_disabled() {
        let app = Router::new()
            .route("/set", get(set_user_handler))
            .layer(StateLayer::new().without_session());

        let response = app.oneshot(get_request("/set", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_missing_state_layer() {
        let app = Router::new().route("/set", get(set_user_handler));

        let response = app.oneshot(get_request("/set", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
