//! OpenAPI document for the JSON side of the admin panel.
//!
//! Pages are HTML and stay out of the document; the user edit action is the
//! one endpoint with a JSON contract.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::admin::users::{ActionData, UserUpdateForm};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// Swagger UI serves this in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Admin panel",
        description = "Form actions of the user administration pages."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::admin::users::update_user),
    components(schemas(ActionData, UserUpdateForm, Error, ErrorCode)),
    tags(
        (name = "admin", description = "User administration")
    )
)]
pub struct ApiDoc;
