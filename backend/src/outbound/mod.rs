//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic.
//!
//! - **memory**: shared in-memory repositories backing every storage port
//! - **captcha**: reqwest-backed human-verification client
//! - **mail**: logging and recording mail transports

pub mod captcha;
pub mod mail;
pub mod memory;
