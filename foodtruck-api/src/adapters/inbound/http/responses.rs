//! JSON envelopes returned by the search endpoints.
//!
//! Success: `{"response": {"text": [0, [<vendor>, ...]]}}`
//! Failure: `{"error": {"text": [<code>, "<message>"]}}`

use serde::Serialize;

use crate::domain::models::Vendor;

/// Status code carried by every successful envelope.
pub const SUCCESS_CODE: u16 = 0;

#[derive(Debug, Serialize)]
pub struct Payload<T> {
    pub text: (u16, T),
}

#[derive(Debug, Serialize)]
pub struct VendorsResponse {
    pub response: Payload<Vec<Vendor>>,
}

impl From<Vec<Vendor>> for VendorsResponse {
    fn from(vendors: Vec<Vendor>) -> Self {
        Self {
            response: Payload {
                text: (SUCCESS_CODE, vendors),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: Payload<String>,
}

impl ErrorResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            error: Payload {
                text: (code, message.into()),
            },
        }
    }
}
