//! HTTP client for an external sea-routing service.

mod client;

pub use client::{HttpPathGenerator, DEFAULT_TIMEOUT};
