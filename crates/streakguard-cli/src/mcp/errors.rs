//! Error handling utilities for MCP server

use rmcp::ErrorData;
use serde_json::json;
use streakguard_core::FreezeError;

/// Convert a holiday error to an MCP error.
///
/// Caller mistakes become `invalid_params` so clients can tell them apart
/// from store failures. `requires_premium` travels in the error data of the
/// former, `retryable` in that of the latter.
pub fn to_mcp_error(message: &str, error: &FreezeError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        FreezeError::InvalidDateRange { .. }
        | FreezeError::AllowanceExceeded { .. }
        | FreezeError::EmptySelection { .. }
        | FreezeError::ActivePeriodExists { .. }
        | FreezeError::AlreadyInactive { .. }
        | FreezeError::NotFound { .. }
        | FreezeError::InvalidInput { .. } => ErrorData::invalid_params(
            text,
            Some(json!({ "requires_premium": error.requires_premium() })),
        ),
        _ => ErrorData::internal_error(
            text,
            Some(json!({ "retryable": error.is_retryable() })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_allowance_error_carries_upgrade_hint() {
        let error = FreezeError::AllowanceExceeded {
            reason: "3 holidays per year".to_string(),
            requires_premium: true,
        };
        let data = to_mcp_error("Failed to create holiday", &error);
        assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
        assert!(data.message.starts_with("Failed to create holiday: "));
        assert_eq!(data.data, Some(json!({ "requires_premium": true })));
    }

    #[test]
    fn test_store_failure_is_internal() {
        let error = FreezeError::CreateFailed {
            message: "disk I/O error".to_string(),
        };
        let data = to_mcp_error("Failed to create holiday", &error);
        assert_eq!(data.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(data.data, Some(json!({ "retryable": true })));

        let config = FreezeError::Configuration {
            message: "no data directory".to_string(),
        };
        let data = to_mcp_error("Failed to start", &config);
        assert_eq!(data.data, Some(json!({ "retryable": false })));
    }
}
