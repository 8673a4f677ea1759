//! HTTP shell: the navigation layer around the TenantHR access core.
//!
//! Requests are routes, `303 See Other` is the redirect primitive, and every
//! view sits behind the route guard.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
