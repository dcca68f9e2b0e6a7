//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET  /login?redirectTo=/admin/users
//! POST /login   email=...&password=...&redirectTo=...
//! POST /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::{Url, form_urlencoded};
use zeroize::Zeroizing;

use crate::domain::{ErrorCode, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const DEFAULT_LANDING: &str = "/admin/";
const LOCAL_ORIGIN: &str = "http://localhost/";

/// Sign-in URL that returns the caller to `path` afterwards.
///
/// # Examples
/// ```
/// use admin_panel::inbound::http::auth::login_location;
///
/// assert_eq!(login_location("/admin/users"), "/login?redirectTo=%2Fadmin%2Fusers");
/// ```
pub fn login_location(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", path)
        .finish();
    format!("/login?{query}")
}

/// Keep only same-origin paths; anything else lands on the dashboard.
fn local_redirect(candidate: Option<&str>) -> &str {
    candidate
        .filter(|path| is_local_path(path))
        .unwrap_or(DEFAULT_LANDING)
}

/// A path is local when a browser resolving it keeps the current origin.
fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/') || path.chars().any(char::is_control) {
        return false;
    }
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(path)
        .is_ok_and(|target| target.origin() == base.origin())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    redirect_to: Option<String>,
}

/// Sign-in form fields. Missing fields read as empty.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    redirect_to: Option<String>,
}

#[derive(Serialize)]
struct LoginPage<'a> {
    email: &'a str,
    redirect_to: &'a str,
    error: Option<String>,
}

fn login_page_response(
    state: &HttpState,
    status: StatusCode,
    page: &LoginPage<'_>,
) -> ApiResult<HttpResponse> {
    state.views.page(status, "login.html", page)
}

#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    query: web::Query<LoginQuery>,
) -> ApiResult<HttpResponse> {
    let redirect_to = local_redirect(query.redirect_to.as_deref());
    login_page_response(
        &state,
        StatusCode::OK,
        &LoginPage {
            email: "",
            redirect_to,
            error: None,
        },
    )
}

/// Authenticate and start a session.
///
/// Validation failures re-render the form with 400, bad credentials with
/// 401. Any other failure uses the error envelope.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        email,
        password,
        redirect_to,
    } = form.into_inner();
    let password = Zeroizing::new(password);
    let redirect_to = local_redirect(redirect_to.as_deref());
    let rejected = |status, message: String| {
        login_page_response(
            &state,
            status,
            &LoginPage {
                email: &email,
                redirect_to,
                error: Some(message),
            },
        )
    };

    let credentials = match LoginCredentials::try_from_parts(&email, &password) {
        Ok(credentials) => credentials,
        Err(err) => return rejected(StatusCode::BAD_REQUEST, err.to_string()),
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(%user_id, "user signed in");
            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, redirect_to))
                .finish())
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            warn!(email = credentials.email(), "sign-in rejected");
            rejected(StatusCode::UNAUTHORIZED, err.message().to_owned())
        }
        Err(err) => Err(err),
    }
}

#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .finish()
}
