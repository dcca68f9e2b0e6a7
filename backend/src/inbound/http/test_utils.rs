//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{MockLoginService, MockUserProfileCommand, MockUsersQuery};
use crate::domain::{Error, UserId};

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};
use super::views::Views;

const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mock ports for handler tests.
///
/// Mocks start without expectations, so any port call a test did not ask
/// for fails the test.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub profiles: MockUserProfileCommand,
}

impl TestPorts {
    pub fn with_users(users: MockUsersQuery) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn with_login(login: MockLoginService) -> Self {
        Self {
            login,
            ..Self::default()
        }
    }

    pub fn with_profiles(users: MockUsersQuery, profiles: MockUserProfileCommand) -> Self {
        Self {
            users,
            profiles,
            ..Self::default()
        }
    }

    fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                users: Arc::new(self.users),
                profiles: Arc::new(self.profiles),
            },
            Arc::new(Views::new().expect("templates parse")),
        )
    }
}

async fn sign_in(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// App with session middleware, handler state built from `ports` and a
/// test-only sign-in route. Callers add the services under test.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .route(
            &format!("{SIGN_IN_PATH}/{{user_id}}"),
            web::post().to(sign_in),
        )
}

/// Sign `user_id` in through the test route and return the session cookie.
pub async fn sign_in_as<S, B>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("{SIGN_IN_PATH}/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    session_cookie(&res)
}
