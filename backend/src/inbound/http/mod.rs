//! HTTP inbound adapter exposing page and mutation endpoints.

pub mod auth;
pub mod communities;
pub mod courses;
pub mod error;
pub mod health;
pub mod invitations;
pub mod mutations;
pub mod pages;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
