use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TripError;
use crate::extract::FailReason;

/// ========================================
/// Request/Reply wire types
/// ========================================

/// The trip-planning form, as posted to `/api/generate` or given on the
/// command line. Fields are deserialized leniently; `validate` enforces the
/// required ones afterwards so missing fields produce a 400, not a decode
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub budget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), TripError> {
        if self.destination.trim().is_empty() || self.days == 0 || self.budget.trim().is_empty() {
            return Err(TripError::Validation(
                "destination, days and budget are required".into(),
            ));
        }
        Ok(())
    }
}

/// The built prompt pair handed to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

/// Response envelope for one generation: the raw model text always travels
/// with the outcome so callers can diagnose failed extractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReply {
    pub success: bool,
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateReply {
    pub fn parsed(raw: String, itinerary: Value) -> Self {
        Self { success: true, raw, itinerary: Some(itinerary), error: None }
    }

    pub fn failed(raw: String, reason: FailReason) -> Self {
        Self { success: false, raw, itinerary: None, error: Some(reason.code().into()) }
    }
}
