//! Client for a hosted Langflow flow.
//!
//! Provides credential loading, the REST wrapper around the flow's
//! `run` endpoint, extraction of the chat message from the nested run
//! response, and [`InsightClient`](insight::InsightClient), which ties
//! those together for the dashboard.

pub mod api;
pub mod config;
pub mod insight;
pub mod response;
