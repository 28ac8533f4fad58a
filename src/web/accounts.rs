//! Account pages: signup, login, logout.
//!
//! Login stores the session token in an HttpOnly `session` cookie. The
//! same token works as a Bearer token against the JSON API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::api::middleware::{authenticate, extract_session_token, AppState};
use crate::models::RegisterInput;
use crate::render::base_context;
use crate::services::{LoginInput, UserServiceError};
use crate::web::{redirect, render, server_error};

/// Session cookie lifetime, matching the server-side expiry
const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `GET /accounts/signup/`
pub async fn signup_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;
    render(&state, "accounts/signup.html", &base_context(user.as_ref()))
}

fn signup_page_with_error(state: &AppState, form: &SignupForm, error: &str) -> Response {
    let mut context = base_context(None);
    context.insert("error", error);
    context.insert("username", &form.username);
    context.insert("email", &form.email);
    if let Some(age) = &form.age {
        context.insert("age", age);
    }
    render(state, "accounts/signup.html", &context)
}

/// `POST /accounts/signup/`
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    // The age field arrives as text so an empty input is not a parse error
    let age = match form.age.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(age) => Some(age),
            Err(_) => {
                return signup_page_with_error(&state, &form, "Age must be a number");
            }
        },
    };

    let input = RegisterInput {
        username: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
        age,
    };
    match state.user_service.register(input).await {
        Ok(user) => {
            tracing::debug!(user_id = user.id, "Signup complete");
            redirect("/accounts/login/")
        }
        Err(UserServiceError::ValidationError(msg)) => signup_page_with_error(&state, &form, &msg),
        Err(UserServiceError::UserExists(who)) => {
            signup_page_with_error(&state, &form, &format!("{} is already taken", who))
        }
        Err(err) => {
            tracing::error!(error = %err, "Signup failed");
            server_error()
        }
    }
}

/// `GET /accounts/login/`
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;
    render(&state, "accounts/login.html", &base_context(user.as_ref()))
}

/// `POST /accounts/login/`
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let input = LoginInput::new(form.username.clone(), form.password.clone());
    match state.user_service.login(input).await {
        Ok(session) => {
            let cookie = format!(
                "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                session.id, SESSION_COOKIE_MAX_AGE_SECS
            );
            match HeaderValue::from_str(&cookie) {
                Ok(value) => (
                    StatusCode::FOUND,
                    [
                        (header::SET_COOKIE, value),
                        (header::LOCATION, HeaderValue::from_static("/")),
                    ],
                )
                    .into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Session cookie construction failed");
                    server_error()
                }
            }
        }
        Err(UserServiceError::AuthenticationError(msg)) => {
            let mut context = base_context(None);
            context.insert("error", &msg);
            context.insert("username", &form.username);
            render(&state, "accounts/login.html", &context)
        }
        Err(err) => {
            tracing::error!(error = %err, "Login failed");
            server_error()
        }
    }
}

/// `POST /accounts/logout/`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(e) = state.user_service.logout(&token).await {
            tracing::error!(error = %e, "Logout failed");
            return server_error();
        }
    }

    (
        StatusCode::FOUND,
        [
            (
                header::SET_COOKIE,
                HeaderValue::from_static("session=; Path=/; HttpOnly; Max-Age=0"),
            ),
            (header::LOCATION, HeaderValue::from_static("/")),
        ],
    )
        .into_response()
}
