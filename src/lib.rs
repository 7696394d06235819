//! Client for the distributed calculation service.
//!
//! DESIGN
//! ======
//! `client` is the authenticated HTTP layer: it injects the stored bearer
//! token into every request and surfaces 401 as an explicit
//! [`ApiError::Unauthorized`](client::ApiError::Unauthorized). `api` adds
//! typed endpoint wrappers on top. Each screen of the calculator UI is a view
//! model under `views`, and `app` wires config, token store, client and
//! router together once at start-up.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod router;
pub mod store;
pub mod types;
pub mod validate;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
