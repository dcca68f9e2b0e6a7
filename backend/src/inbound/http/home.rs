//! Public landing page.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Serialize)]
struct HomePage {
    signed_in: bool,
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let signed_in = session.user_id()?.is_some();
    state
        .views
        .page(StatusCode::OK, "home.html", HomePage { signed_in })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{TestPorts, sign_in_as, test_app};
    use actix_web::test;

    #[actix_web::test]
    async fn anonymous_visitors_see_sign_in_link() {
        let app = test::init_service(test_app(TestPorts::default()).service(home)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(body.contains(r#"href="/login""#));
    }

    #[actix_web::test]
    async fn signed_in_visitors_see_admin_link() {
        let app = test::init_service(test_app(TestPorts::default()).service(home)).await;
        let cookie = sign_in_as(&app, &UserId::random()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;

        let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(body.contains(r#"href="/admin/""#));
        assert!(body.contains(r#"action="/logout""#));
    }
}
