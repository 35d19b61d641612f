//! SocialLens API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! dashboard rendering, sessions) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod seed;
pub mod session;
pub mod state;
