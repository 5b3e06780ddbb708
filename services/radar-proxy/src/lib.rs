//! NEXRAD raw-file proxy service library.
//!
//! Fetches one raw Level II file from the upstream archive per request and
//! returns it base64-encoded inside a JSON envelope.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod server;
pub mod state;
pub mod upstream;
