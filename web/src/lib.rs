//! HTTP UI for the tip jar.
//!
//! A single server-rendered page drives the session controller through
//! plain form posts, each answered with a redirect back to the page.
//! `GET /api/session` exposes the same state as JSON.

pub mod error;
pub mod guard;
pub mod page;
pub mod routes;
pub mod server;

pub use error::WebError;
pub use routes::{router, SessionResponse};
pub use server::WebServer;
