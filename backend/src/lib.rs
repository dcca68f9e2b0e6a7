//! Server-rendered administration panel for user accounts.
//!
//! Layers follow a hexagonal layout: [`domain`] holds the rules and ports,
//! [`inbound`] the Actix handlers and templates, [`outbound`] the storage
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
