//! HTTP request handlers for the radar proxy.

pub mod health;
pub mod radar;
