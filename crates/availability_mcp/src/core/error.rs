use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

// Error codes
const ERROR_INVALID_TIMEZONE: &str = "invalid_timezone";
const ERROR_INVALID_OUTPUT_FORMAT: &str = "invalid_output_format";
const ERROR_INVALID_SLOT_ORDERING: &str = "invalid_slot_ordering";
const ERROR_INVALID_TIMESTAMP: &str = "invalid_timestamp";
const ERROR_NONEXISTENT_LOCAL_TIME: &str = "nonexistent_local_time";
const ERROR_INVALID_GRANULARITY: &str = "invalid_granularity";
const ERROR_UNAUTHORIZED: &str = "unauthorized";
const ERROR_INTERNAL: &str = "internal_error";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Errors raised while validating, normalizing or rendering availability
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("Invalid output_format: {format}. Must be either 'continuous' or 'chunks'")]
    InvalidOutputMode { format: String },
    #[error("Start time must be before end time for each slot (slot {index})")]
    InvalidSlotOrdering { index: usize },
    #[error("Invalid timestamp: {value}. Expected ISO 8601, e.g. 2024-03-20T09:00:00-04:00")]
    InvalidTimestamp { value: String },
    #[error("Local time {value} does not exist in {timezone}")]
    NonexistentLocalTime { value: String, timezone: String },
    #[error("Invalid slot granularity: {minutes} minutes. Must be a positive integer")]
    InvalidGranularity { minutes: i64 },
    #[error("Missing or invalid API key")]
    Unauthorized,
    #[error("Unexpected failure: {detail}")]
    Unexpected { detail: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl AvailabilityError {
    /// Whether the error was caused by the caller's input rather than a server fault
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AvailabilityError::Unexpected { .. } | AvailabilityError::LoggingInitialization(_)
        )
    }
}

impl From<AvailabilityError> for McpError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidTimezone { timezone } => McpError::invalid_params(
                ERROR_INVALID_TIMEZONE,
                Some(json!({"timezone": timezone})),
            ),
            AvailabilityError::InvalidOutputMode { format } => McpError::invalid_params(
                ERROR_INVALID_OUTPUT_FORMAT,
                Some(json!({
                    "output_format": format,
                    "valid_formats": ["continuous", "chunks"]
                })),
            ),
            AvailabilityError::InvalidSlotOrdering { index } => McpError::invalid_params(
                ERROR_INVALID_SLOT_ORDERING,
                Some(json!({
                    "slot_index": index,
                    "message": "Start time must be before end time for each slot"
                })),
            ),
            AvailabilityError::InvalidTimestamp { value } => {
                McpError::invalid_params(ERROR_INVALID_TIMESTAMP, Some(json!({"value": value})))
            }
            AvailabilityError::NonexistentLocalTime { value, timezone } => McpError::invalid_params(
                ERROR_NONEXISTENT_LOCAL_TIME,
                Some(json!({"value": value, "timezone": timezone})),
            ),
            AvailabilityError::InvalidGranularity { minutes } => McpError::invalid_params(
                ERROR_INVALID_GRANULARITY,
                Some(json!({"slot_granularity_minutes": minutes})),
            ),
            AvailabilityError::Unauthorized => McpError::invalid_request(ERROR_UNAUTHORIZED, None),
            AvailabilityError::Unexpected { detail } => {
                tracing::error!("Unexpected failure while generating availability: {}", detail);
                McpError::internal_error(ERROR_INTERNAL, None)
            }
            AvailabilityError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": crate::server::AVAILABLE_RESOURCES
                })),
            ),
            AvailabilityError::LoggingInitialization(msg) => {
                tracing::error!("Logging initialization failed: {}", msg);
                McpError::internal_error(ERROR_INTERNAL, None)
            }
        }
    }
}

pub type AvailabilityResult<T> = Result<T, AvailabilityError>;
pub type McpResult<T> = Result<T, McpError>;
