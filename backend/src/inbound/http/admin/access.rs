//! Admin gate as a request extractor.
//!
//! Every admin handler takes an [`AdminUser`] as its first argument, so the
//! handler body never runs for anonymous or non-admin callers.

use actix_web::http::{Method, StatusCode};
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AdminAccess, Error, User};
use crate::inbound::http::auth::login_location;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signed-in user holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(User);

impl AdminUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Why the gate refused a request.
#[derive(Debug, thiserror::Error)]
pub enum AdminGateRejection {
    /// No session identity; sign in and come back to `redirect_to`.
    #[error("sign-in required")]
    SignIn { redirect_to: String },
    /// Identity is unknown or lacks the admin role.
    #[error("admin role required")]
    Denied,
    /// The gate itself failed.
    #[error(transparent)]
    Failed(#[from] Error),
}

impl ResponseError for AdminGateRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SignIn { .. } | Self::Denied => StatusCode::SEE_OTHER,
            Self::Failed(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::SignIn { redirect_to } => HttpResponse::SeeOther()
                .insert_header((LOCATION, login_location(redirect_to)))
                .finish(),
            Self::Denied => HttpResponse::SeeOther()
                .insert_header((LOCATION, "/"))
                .finish(),
            Self::Failed(error) => error.error_response(),
        }
    }
}

async fn admit(
    state: Option<web::Data<HttpState>>,
    session: SessionContext,
    method: Method,
    path: String,
) -> Result<AdminUser, AdminGateRejection> {
    let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let identity = session.user_id()?;

    match AdminAccess::resolve(state.users.as_ref(), identity).await? {
        AdminAccess::Granted(user) => Ok(AdminUser(user)),
        AdminAccess::SignInRequired => {
            warn!(%method, %path, "admin access without session");
            Err(AdminGateRejection::SignIn { redirect_to: path })
        }
        AdminAccess::Denied(reason) => {
            warn!(%method, %path, ?reason, "admin access denied");
            Err(AdminGateRejection::Denied)
        }
    }
}

impl FromRequest for AdminUser {
    type Error = AdminGateRejection;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = SessionContext::from_request(req, payload);
        let method = req.method().clone();
        let path = req.path().to_owned();

        Box::pin(async move {
            let session = session.await.map_err(Error::from)?;
            admit(state, session, method, path).await
        })
    }
}
