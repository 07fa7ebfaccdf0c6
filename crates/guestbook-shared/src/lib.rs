//! # Guestbook Shared
//!
//! Wire types shared between the server and its clients: the response
//! envelope, the error-code taxonomy and the request DTOs.

pub mod dto;
pub mod response;

pub use response::{Envelope, ErrorBody, ErrorCode, ErrorEnvelope, Meta};
