use serde::{Deserialize, Serialize};

use super::upload::StoredObjectReference;

/// JSON body posted to the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    pub input_bucket: String,
    pub input_bucket_file: String,
}

impl From<&StoredObjectReference> for ProcessingRequest {
    fn from(reference: &StoredObjectReference) -> Self {
        Self {
            input_bucket: reference.bucket.clone(),
            input_bucket_file: reference.key.clone(),
        }
    }
}

/// Outcome of the downstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// Status 200.
    Completed { body: String },
    /// Any other status, with the raw response body.
    Rejected { status: u16, body: String },
}

impl ProcessingResult {
    pub fn from_response(status: u16, body: String) -> Self {
        if status == 200 {
            ProcessingResult::Completed { body }
        } else {
            ProcessingResult::Rejected { status, body }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessingResult::Completed { .. })
    }
}
