//! Admin panel route modules

pub mod auth;
pub mod backup;
pub mod broadcasts;
pub mod health;
pub mod tracks;
