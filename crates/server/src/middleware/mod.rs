//! HTTP middleware.
//!
//! - `request_id` - Tag every request/response with an `x-request-id`

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
