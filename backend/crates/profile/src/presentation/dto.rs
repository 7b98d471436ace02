//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Update profile request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Photo upload response
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub photo_url: String,
}
