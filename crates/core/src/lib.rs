//! Trackquiz Core - Domain logic and models
//!
//! This crate contains the domain models, error types, shared configuration
//! and the track selection algorithm. It performs no I/O of its own; storage
//! is reached through the traits in [`selector`].

pub mod config;
pub mod error;
pub mod models;
pub mod selector;

pub use error::GameError;
pub use selector::{PlayHistory, TrackSelector, TrackSource};
