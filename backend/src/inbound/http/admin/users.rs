//! Admin dashboard, user listing and user edit handlers.
//!
//! ```text
//! GET  /admin/
//! GET  /admin/users
//! GET  /admin/users/{userId}
//! POST /admin/users/{userId}   id=...&email=...&firstName=...&lastName=...&about=...
//! ```
//!
//! The edit action answers with JSON `ActionData` unless the caller prefers
//! `text/html`, in which case the edit page is rendered again.

use std::collections::BTreeMap;

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::http::header::{Accept, Header};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, User, UserId, UserUpdateRejection, UserUpdateSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

use super::{AdminLayout, AdminUser};

const USER_NOT_FOUND: &str = "User not found";

/// Whether the caller asked for a page rather than JSON.
fn prefers_html(req: &HttpRequest) -> bool {
    Accept::parse(req).is_ok_and(|accept| accept.preference().essence_str() == "text/html")
}

#[derive(Serialize)]
struct DashboardPage {
    layout: AdminLayout,
}

pub async fn dashboard(
    admin: AdminUser,
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let page = DashboardPage {
        layout: AdminLayout::new("Admin - Dashboard", &admin, req.path()),
    };
    state
        .views
        .page(StatusCode::OK, "admin/dashboard.html", page)
}

/// One row of the user table.
#[derive(Debug, Serialize)]
struct UserRow {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    roles: Vec<&'static str>,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        let roles = user.roles().iter().map(|role| role.label()).collect();
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            roles,
        }
    }
}

#[derive(Serialize)]
struct UsersPage {
    layout: AdminLayout,
    users: Vec<UserRow>,
}

/// Render every user in repository order.
#[get("/users")]
pub async fn list_users(
    admin: AdminUser,
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    let page = UsersPage {
        layout: AdminLayout::new("Admin - Users", &admin, req.path()),
        users: users.into_iter().map(UserRow::from).collect(),
    };
    state.views.page(StatusCode::OK, "admin/users.html", page)
}

/// Field values shown in the edit form.
#[derive(Debug, Default, Serialize)]
struct FormValues {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    about: String,
}

impl From<&User> for FormValues {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            about: profile.about.clone(),
        }
    }
}

impl FormValues {
    /// Submitted values for a re-rendered form. The id always names the
    /// user in the route so the form posts back to the same page.
    fn resubmitted(route_id: &UserId, submission: &UserUpdateSubmission) -> Self {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            id: route_id.to_string(),
            email: value(&submission.email),
            first_name: value(&submission.first_name),
            last_name: value(&submission.last_name),
            about: value(&submission.about),
        }
    }
}

/// Outcome of the edit action.
///
/// Success serializes as `{}`; failures carry either one field error or a
/// form-level error.
#[derive(Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
}

impl From<UserUpdateRejection> for ActionData {
    fn from(rejection: UserUpdateRejection) -> Self {
        let message = rejection.to_string();
        match rejection.field() {
            Some(field) => Self {
                form_error: None,
                field_errors: BTreeMap::from([(field.to_owned(), message)]),
            },
            None => Self {
                form_error: Some(message),
                field_errors: BTreeMap::new(),
            },
        }
    }
}

#[derive(Serialize)]
struct EditPage {
    layout: AdminLayout,
    form: FormValues,
    action: ActionData,
    saved: bool,
}

#[derive(Serialize)]
struct MissingPage {
    layout: AdminLayout,
    message: &'static str,
}

fn missing_user_page(state: &HttpState, layout: AdminLayout) -> ApiResult<HttpResponse> {
    state.views.page(
        StatusCode::NOT_FOUND,
        "admin/user_missing.html",
        MissingPage {
            layout,
            message: USER_NOT_FOUND,
        },
    )
}

fn edit_page(state: &HttpState, status: StatusCode, page: EditPage) -> ApiResult<HttpResponse> {
    state.views.page(status, "admin/user_edit.html", page)
}

fn route_user_id(raw: &str) -> Option<UserId> {
    UserId::new(raw)
        .inspect_err(|err| debug!(user_id = raw, error = %err, "unusable user id in path"))
        .ok()
}

/// Show the edit form for one user, or a 404 page when it does not exist.
#[get("/users/{user_id}")]
pub async fn edit_user(
    admin: AdminUser,
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let layout = AdminLayout::new("Admin - Edit User", &admin, req.path());
    let user = match route_user_id(&path) {
        Some(id) => state.users.find_user(&id).await?,
        None => None,
    };
    match user {
        Some(user) => edit_page(
            &state,
            StatusCode::OK,
            EditPage {
                layout,
                form: FormValues::from(&user),
                action: ActionData::default(),
                saved: false,
            },
        ),
        None => missing_user_page(&state, layout),
    }
}

/// Submitted edit form. Every field may be absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateForm {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
}

impl From<UserUpdateForm> for UserUpdateSubmission {
    fn from(form: UserUpdateForm) -> Self {
        let UserUpdateForm {
            id,
            email,
            first_name,
            last_name,
            about,
        } = form;
        Self {
            id,
            email,
            first_name,
            last_name,
            about,
        }
    }
}

/// Answer an unreadable edit form body like an incomplete form.
///
/// Covers wrong content types, duplicate keys and undecodable payloads.
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "unreadable user edit form");
    let action = ActionData::from(UserUpdateRejection::IncompleteForm);
    InternalError::from_response(err, HttpResponse::BadRequest().json(action)).into()
}

/// Validate and save a user's names and about text.
#[utoipa::path(
    post,
    path = "/admin/users/{user_id}",
    params(("user_id" = String, Path, description = "Id of the edited user")),
    request_body(content = UserUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Saved", body = ActionData),
        (status = 303, description = "Caller is not a signed-in admin"),
        (status = 400, description = "Validation failed", body = ActionData),
        (status = 404, description = "No user matches the id and email", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateUser",
    security(("SessionCookie" = []))
)]
#[post("/users/{user_id}")]
pub async fn update_user(
    admin: AdminUser,
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<UserUpdateForm>,
) -> ApiResult<HttpResponse> {
    let html = prefers_html(&req);
    let layout = AdminLayout::new("Admin - Edit User", &admin, req.path());

    let Some(route_id) = route_user_id(&path) else {
        return if html {
            missing_user_page(&state, layout)
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        };
    };

    let submission = UserUpdateSubmission::from(form.into_inner());
    let submitted = FormValues::resubmitted(&route_id, &submission);
    let update = match submission.validate(&route_id) {
        Ok(update) => update,
        Err(rejection) => {
            debug!(user_id = %route_id, %rejection, "user edit rejected");
            let action = ActionData::from(rejection);
            return if html {
                edit_page(
                    &state,
                    StatusCode::BAD_REQUEST,
                    EditPage {
                        layout,
                        form: submitted,
                        action,
                        saved: false,
                    },
                )
            } else {
                Ok(HttpResponse::BadRequest().json(action))
            };
        }
    };

    match state.profiles.update_user(update).await {
        Ok(user) if html => edit_page(
            &state,
            StatusCode::OK,
            EditPage {
                layout,
                form: FormValues::from(&user),
                action: ActionData::default(),
                saved: true,
            },
        ),
        Ok(_) => Ok(HttpResponse::Ok().json(ActionData::default())),
        Err(err) if html && err.code() == ErrorCode::NotFound => missing_user_page(&state, layout),
        Err(err) => Err(err),
    }
}
