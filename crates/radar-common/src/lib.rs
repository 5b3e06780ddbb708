//! Common types shared by the NEXRAD raw-file proxy and its clients.

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode_payload, encode_payload};
pub use error::{ProxyError, ProxyResult};
pub use types::{ErrorResponse, RadarFileQuery, RadarFileRequest, RadarFileResponse, SUCCESS_MESSAGE};
