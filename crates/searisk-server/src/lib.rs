//! Shared library surface for the searisk server and its tests.

pub mod api;
pub mod config;
pub mod state;
