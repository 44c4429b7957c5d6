//! Route handlers organized by resource

use serde::Serialize;

pub mod listings;
pub mod status;

/// `{"message": ...}` response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
