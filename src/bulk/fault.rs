use serde::{Deserialize, Serialize};

/// Error from an `AdApiFaultDetail`, usually an authentication or quota problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AdApiError {
    pub code: i32,
    pub detail: Option<String>,
    pub error_code: String,
    pub message: String,
}

/// Error tied to one item of a batch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchError {
    pub code: i32,
    pub details: Option<String>,
    pub error_code: String,
    pub field_path: Option<String>,
    pub index: i32,
    pub message: String,
}

/// Error for the operation as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OperationError {
    pub code: i32,
    pub details: Option<String>,
    pub error_code: String,
    pub message: String,
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.error_code, self.code, self.message)
    }
}

/// Fault returned by the service instead of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFault {
    AdApi {
        tracking_id: Option<String>,
        errors: Vec<AdApiError>,
    },
    Api {
        tracking_id: Option<String>,
        batch_errors: Vec<BatchError>,
        operation_errors: Vec<OperationError>,
    },
}

impl std::fmt::Display for ApiFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, parts): (&str, Vec<String>) = match self {
            ApiFault::AdApi { errors, .. } => (
                "AdApiFault",
                errors
                    .iter()
                    .map(|e| format!("{} ({}): {}", e.error_code, e.code, e.message))
                    .collect(),
            ),
            ApiFault::Api {
                batch_errors,
                operation_errors,
                ..
            } => (
                "ApiFault",
                batch_errors
                    .iter()
                    .map(|e| format!("[{}] {} ({}): {}", e.index, e.error_code, e.code, e.message))
                    .chain(operation_errors.iter().map(OperationError::to_string))
                    .collect(),
            ),
        };
        if parts.is_empty() {
            write!(f, "{name}: no error details")
        } else {
            write!(f, "{name}: {}", parts.join("; "))
        }
    }
}

impl std::error::Error for ApiFault {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FaultBody {
    #[serde(rename = "Type")]
    kind: Option<String>,
    tracking_id: Option<String>,
    #[serde(default)]
    errors: Vec<AdApiError>,
    #[serde(default)]
    batch_errors: Vec<BatchError>,
    #[serde(default)]
    operation_errors: Vec<OperationError>,
}

impl ApiFault {
    /// Decode a fault from an error response body. `None` when the body is not a fault.
    pub fn from_body(body: &str) -> Option<ApiFault> {
        let fault: FaultBody = serde_json::from_str(body).ok()?;
        let is_ad_api = fault
            .kind
            .as_deref()
            .is_some_and(|kind| kind.starts_with("AdApiFault"));
        if is_ad_api || (!fault.errors.is_empty() && fault.batch_errors.is_empty()) {
            return Some(ApiFault::AdApi {
                tracking_id: fault.tracking_id,
                errors: fault.errors,
            });
        }
        if fault.batch_errors.is_empty() && fault.operation_errors.is_empty() {
            return None;
        }
        Some(ApiFault::Api {
            tracking_id: fault.tracking_id,
            batch_errors: fault.batch_errors,
            operation_errors: fault.operation_errors,
        })
    }

    pub fn tracking_id(&self) -> Option<&str> {
        match self {
            ApiFault::AdApi { tracking_id, .. } | ApiFault::Api { tracking_id, .. } => {
                tracking_id.as_deref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ad_api_fault() {
        let body = r#"{
            "Type": "AdApiFaultDetail",
            "TrackingId": "b7a4",
            "Errors": [{"Code": 105, "ErrorCode": "InvalidCredentials", "Message": "Authentication failed."}]
        }"#;
        let fault = ApiFault::from_body(body).unwrap();
        assert_eq!(fault.tracking_id(), Some("b7a4"));
        let ApiFault::AdApi { errors, .. } = &fault else {
            panic!("expected AdApi fault, got {fault:?}");
        };
        assert_eq!(errors[0].error_code, "InvalidCredentials");
        assert_eq!(
            fault.to_string(),
            "AdApiFault: InvalidCredentials (105): Authentication failed."
        );
    }

    #[test]
    fn decodes_api_fault_with_batch_and_operation_errors() {
        let body = r#"{
            "Type": "ApiFaultDetail",
            "BatchErrors": [{"Code": 1100, "ErrorCode": "CampaignServiceInvalidAccountId", "Index": 2, "Message": "Bad id."}],
            "OperationErrors": [{"Code": 4100, "ErrorCode": "BulkServiceNoMoreThan", "Message": "Too many."}]
        }"#;
        let fault = ApiFault::from_body(body).unwrap();
        let ApiFault::Api {
            batch_errors,
            operation_errors,
            ..
        } = fault
        else {
            panic!("expected Api fault");
        };
        assert_eq!(batch_errors[0].index, 2);
        assert_eq!(operation_errors[0].code, 4100);
    }

    #[test]
    fn non_fault_bodies_are_rejected() {
        assert!(ApiFault::from_body("<html>Bad Gateway</html>").is_none());
        assert!(ApiFault::from_body(r#"{"Message": "nope"}"#).is_none());
    }
}
