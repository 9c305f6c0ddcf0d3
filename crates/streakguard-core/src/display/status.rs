//! One-line status messages for operation feedback.

use std::fmt;

/// A confirmation or refusal shown after an operation.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    /// Yes/no answer to a frozen-day query.
    pub fn frozen(date: &str, frozen: bool) -> Self {
        if frozen {
            Self::success(format!("{date} is frozen; a missed day does not break the streak"))
        } else {
            Self::failure(format!("{date} is not frozen"))
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}
