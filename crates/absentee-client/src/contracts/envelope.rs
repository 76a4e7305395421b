use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

/// Wrapper for every successful command result.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let data = serde_json::to_value(data)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    debug!(command, "command succeeded");
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data,
    })
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            ok: false,
            error: ErrorContract {
                code: error.code.clone(),
                message: error.message.clone(),
                recovery_steps: error.recovery_steps.clone(),
            },
            data: error.data.clone(),
        }
    }
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope::from(error)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{failure_from_error, success};
    use crate::ClientError;

    #[test]
    fn success_wraps_command_and_version() {
        let envelope = success("days", json!({"days_official": 3}));
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert!(envelope.ok);
            assert_eq!(envelope.command, "days");
            assert_eq!(envelope.data["days_official"], 3);
        }
    }

    #[test]
    fn failure_keeps_code_and_data() {
        let error = ClientError::record_not_found("trip_missing");
        let envelope = failure_from_error(&error);
        assert!(!envelope.ok);
        assert_eq!(envelope.error.code, "record_not_found");
        assert_eq!(
            envelope.data.as_ref().and_then(|data| data.get("record_id")),
            Some(&json!("trip_missing"))
        );
    }
}
