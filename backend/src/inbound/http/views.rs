//! Server-side HTML rendering with MiniJinja.
//!
//! Templates are compiled into the binary and parsed once at startup.
//! `.html` templates are auto-escaped.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

use crate::domain::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/base.html")),
    ("home.html", include_str!("../../../templates/home.html")),
    ("login.html", include_str!("../../../templates/login.html")),
    (
        "admin/layout.html",
        include_str!("../../../templates/admin/layout.html"),
    ),
    (
        "admin/dashboard.html",
        include_str!("../../../templates/admin/dashboard.html"),
    ),
    (
        "admin/users.html",
        include_str!("../../../templates/admin/users.html"),
    ),
    (
        "admin/user_edit.html",
        include_str!("../../../templates/admin/user_edit.html"),
    ),
    (
        "admin/user_missing.html",
        include_str!("../../../templates/admin/user_missing.html"),
    ),
];

/// Template loading failure at startup.
#[derive(Debug, thiserror::Error)]
#[error("failed to load template {name}: {source}")]
pub struct ViewsError {
    name: &'static str,
    #[source]
    source: minijinja::Error,
}

/// Compiled page templates.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ViewsError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| ViewsError { name, source })?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `context` into an HTML string.
    pub fn render<C: Serialize>(&self, name: &str, context: C) -> Result<String, Error> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|err| {
                error!(template = name, error = %err, "template rendering failed");
                Error::internal(format!("failed to render {name}"))
            })
    }

    /// Render `name` into a complete HTML response.
    pub fn page<C: Serialize>(
        &self,
        status: StatusCode,
        name: &str,
        context: C,
    ) -> Result<HttpResponse, Error> {
        let body = self.render(name, context)?;
        Ok(HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use rstest::rstest;

    #[rstest]
    fn every_template_parses() {
        let views = Views::new().expect("templates parse");
        for &(name, _) in TEMPLATES {
            assert!(views.env.get_template(name).is_ok(), "{name} registered");
        }
    }

    #[rstest]
    fn html_output_is_escaped() {
        let views = Views::new().expect("templates parse");
        let html = views
            .render(
                "login.html",
                context! { email => "<script>alert(1)</script>", redirect_to => "/admin/" },
            )
            .expect("render login");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[rstest]
    fn unknown_template_is_internal_error() {
        let views = Views::new().expect("templates parse");
        let err = views.render("missing.html", ()).expect_err("no such template");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}
