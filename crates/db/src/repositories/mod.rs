//! Repository layer: one zero-sized struct per table with async query functions.

pub mod engagement_repo;

pub use engagement_repo::EngagementRepo;
