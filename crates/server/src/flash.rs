//! One-shot messages carried across a redirect in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
pub const USERNAME_TAKEN: &str = "username_taken";
pub const REGISTERED: &str = "registered";
/// Registered, but the admin checkbox was ignored because admin signup is off.
pub const REGISTERED_WITHOUT_ADMIN: &str = "registered_without_admin";
pub const HOUSE_SAVED: &str = "house_saved";

pub fn set(jar: CookieJar, code: impl Into<String>) -> CookieJar {
    let mut cookie = Cookie::new(FLASH_COOKIE, code.into());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Read the pending message and clear it.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) {
        Some(code) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(code)),
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_and_clears() {
        let jar = set(CookieJar::new(), "missing_field:title");
        let (jar, code) = take(jar);
        assert_eq!(code.as_deref(), Some("missing_field:title"));
        assert!(jar.get(FLASH_COOKIE).is_none());
        let (_, again) = take(jar);
        assert_eq!(again, None);
    }
}
