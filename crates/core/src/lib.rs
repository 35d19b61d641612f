//! Domain logic for the SocialLens engagement dashboard.
//!
//! Pure, I/O-free building blocks shared by the database layer and the
//! HTTP server: engagement record types and the mock data generator,
//! prompt builders for the hosted insight flow, and parsing of the
//! metrics the flow reports back.

pub mod engagement;
pub mod error;
pub mod metrics;
pub mod query;
pub mod types;
