//! Session cookie handling and the identity extractors used by handlers.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::AuthUser;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Identity of the caller, if a valid session cookie names an existing user.
pub struct MaybeUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<ServerState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(&state.cookie_name) else { return Ok(MaybeUser(None)) };
        let user = state.auth.resolve_session(cookie.value()).await?;
        Ok(MaybeUser(user))
    }
}

pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session(jar: CookieJar, name: &str) -> CookieJar {
    jar.remove(Cookie::build(name.to_string()).path("/"))
}
