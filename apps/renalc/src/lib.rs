//! # renalc application library
//!
//! Everything the binary is built from, exposed as a library so the
//! integration tests can drive the API router and history store directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod history;
