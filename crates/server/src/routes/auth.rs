use axum::{extract::State, response::Redirect, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::errors::AuthError;

use crate::errors::ApiError;
use crate::flash;
use crate::session::{clear_session, session_cookie, MaybeUser};
use crate::state::ServerState;

/// A blank form: which fields to submit and the pending flash message.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormView {
    pub fields: Vec<String>,
    pub flash: Option<String>,
}

impl FormView {
    pub fn new(fields: &[&str], flash: Option<String>) -> Self {
        Self { fields: fields.iter().map(|f| f.to_string()).collect(), flash }
    }
}

/// Urlencoded account form. Fields are optional so that absence becomes a
/// flash message instead of a rejection.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Checkbox: only presence matters.
    pub is_admin: Option<String>,
}

impl AccountForm {
    fn credentials(self) -> Result<(String, String, bool), &'static str> {
        let username = self.username.filter(|u| !u.trim().is_empty()).ok_or("username")?;
        let password = self.password.filter(|p| !p.is_empty()).ok_or("password")?;
        Ok((username, password, self.is_admin.is_some()))
    }
}

fn missing(jar: CookieJar, field: &str, back_to: &'static str) -> (CookieJar, Redirect) {
    (flash::set(jar, format!("missing_field:{field}")), Redirect::to(back_to))
}

/// The admin checkbox is only offered when `auth.allow_admin_signup` is set.
pub async fn register_form(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<FormView>) {
    let (jar, message) = flash::take(jar);
    let fields: &[&str] = if state.allow_admin_signup {
        &["username", "password", "is_admin"]
    } else {
        &["username", "password"]
    };
    (jar, Json(FormView::new(fields, message)))
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body(content = crate::openapi::AccountFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 303, description = "Redirect to /login on success, back to /register with a flash message otherwise")))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<AccountForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (username, password, wants_admin) = match form.credentials() {
        Ok(c) => c,
        Err(field) => return Ok(missing(jar, field, "/register")),
    };
    let admin_ignored = wants_admin && !state.allow_admin_signup;
    let input = RegisterInput { username, password, is_admin: wants_admin && state.allow_admin_signup };

    match state.auth.register(input).await {
        Ok(_) if admin_ignored => Ok((flash::set(jar, flash::REGISTERED_WITHOUT_ADMIN), Redirect::to("/login"))),
        Ok(_) => Ok((flash::set(jar, flash::REGISTERED), Redirect::to("/login"))),
        Err(AuthError::Conflict) => Ok((flash::set(jar, flash::USERNAME_TAKEN), Redirect::to("/register"))),
        Err(AuthError::Validation(_)) => Ok((flash::set(jar, "invalid_field:username"), Redirect::to("/register"))),
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(jar: CookieJar) -> (CookieJar, Json<FormView>) {
    let (jar, message) = flash::take(jar);
    (jar, Json(FormView::new(&["username", "password"], message)))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body(content = crate::openapi::AccountFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 303, description = "Session cookie set and redirect to /, or back to /login with invalid_credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<AccountForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (username, password, _) = match form.credentials() {
        Ok(c) => c,
        Err(field) => return Ok(missing(jar, field, "/login")),
    };

    match state.auth.login(LoginInput { username, password }).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state.cookie_name, session.token));
            Ok((jar, Redirect::to("/")))
        }
        Err(AuthError::Unauthorized) => Ok((flash::set(jar, flash::INVALID_CREDENTIALS), Redirect::to("/login"))),
        Err(e) => Err(e.into()),
    }
}

/// The session cookie is cleared whether or not it still names a user.
#[utoipa::path(get, path = "/logout", tag = "auth", responses((status = 303, description = "Session cleared"), (status = 401, description = "No live session; any stale cookie is cleared")))]
pub async fn logout(
    State(state): State<ServerState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), (CookieJar, ApiError)> {
    let jar = clear_session(jar, &state.cookie_name);
    match user {
        Some(user) => {
            info!(user_id = user.id, "logout");
            Ok((jar, Redirect::to("/")))
        }
        None => Err((jar, ApiError::Unauthenticated)),
    }
}
