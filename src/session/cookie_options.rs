use cookie::time::Duration;
use cookie::{Cookie, SameSite};

/// Configuration options for the session-id cookie.
///
/// # Example
///
/// ```rust
/// use statebag::CookieOptions;
///
/// let cookie_options = CookieOptions::build()
///         .name("app_sid")
///         .http_only(true)
///         .same_site(statebag::cookie::SameSite::Lax)
///         .secure(true)
///         .max_age(20 * 60)
///         .path("/");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CookieOptions {
    pub http_only: bool,
    pub name: &'static str,
    pub domain: Option<&'static str>,
    pub path: Option<&'static str>,
    pub same_site: SameSite,
    pub secure: bool,
    /// Lifetime in seconds. `None` leaves the cookie to the browser session.
    pub max_age: Option<i64>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            name: "sid",
            domain: None,
            path: Some("/"),
            same_site: SameSite::Lax,
            secure: true,
            max_age: None,
        }
    }
}

impl CookieOptions {
    /// Creates a new `CookieOptions` with default values.
    pub fn build() -> Self {
        Self::default()
    }

    /// Sets the name of the cookie.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn domain(mut self, domain: &'static str) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn path(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Builds a cookie carrying `value` with these options applied.
    pub fn to_cookie(&self, value: String) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name, value))
            .secure(self.secure)
            .http_only(self.http_only)
            .same_site(self.same_site);

        if let Some(seconds) = self.max_age {
            builder = builder.max_age(Duration::seconds(seconds));
        }
        if let Some(domain) = self.domain {
            builder = builder.domain(domain);
        }
        if let Some(path) = self.path {
            builder = builder.path(path);
        }

        builder.build()
    }
}
