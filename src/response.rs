//! Response bodies that are not documents.

use serde::Serialize;

/// Confirmation body, e.g. `{"message": "Post deleted successfully"}`.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn deleted(resource_name: &str) -> Self {
        MessageBody {
            message: format!("{} deleted successfully", resource_name),
        }
    }
}
