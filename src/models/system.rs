/// Health check payload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: bool,
}

/// Acknowledgement for operations without a result body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuccessMessage {
    pub message: String,
}

impl SuccessMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
