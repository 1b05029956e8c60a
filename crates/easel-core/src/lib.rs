//! Core types, config, errors, and event wiring for Easel.

pub mod config;
pub mod error;
pub mod events;
