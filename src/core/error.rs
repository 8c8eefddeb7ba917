//! Typed error handling for the trellis framework
//!
//! This module provides a typed error hierarchy so callers can handle
//! failures specifically rather than dealing with generic `anyhow::Error`
//! values.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration parsing and schema loading
//! - [`StoreError`]: store-module construction and composition
//! - [`ClientError`]: endpoint resolution and API calls
//!
//! Validation *failures* are not errors: a failed check is an expected
//! outcome, returned as data (`ValidationReport { status: false, .. }`).
//! Only a broken validation configuration (an unknown rule type) surfaces
//! here, as [`ConfigError::UnknownRuleType`].
//!
//! # Example
//!
//! ```rust,ignore
//! match CrudModule::builder("session").items(["LOGIN", "LOGIN"]).build() {
//!     Err(TrellisError::Store(StoreError::DuplicateOperation { item, .. })) => {
//!         eprintln!("operation '{}' declared twice", item);
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use std::fmt;

/// The main error type for the trellis framework
#[derive(Debug)]
pub enum TrellisError {
    /// Configuration errors (YAML parsing, schema loading)
    Config(ConfigError),

    /// Store-module construction and composition errors
    Store(StoreError),

    /// API client errors
    Client(ClientError),

    /// Internal framework errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for TrellisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrellisError::Config(e) => write!(f, "{}", e),
            TrellisError::Store(e) => write!(f, "{}", e),
            TrellisError::Client(e) => write!(f, "{}", e),
            TrellisError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for TrellisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrellisError::Config(e) => Some(e),
            TrellisError::Store(e) => Some(e),
            TrellisError::Client(e) => Some(e),
            TrellisError::Internal(_) => None,
        }
    }
}

impl TrellisError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TrellisError::Config(e) => e.error_code(),
            TrellisError::Store(e) => e.error_code(),
            TrellisError::Client(e) => e.error_code(),
            TrellisError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and schema loading
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration or schema document
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },

    /// A validation schema references a rule type that does not exist
    UnknownRuleType { rule: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConfigError::UnknownRuleType { rule } => {
                write!(f, "Unknown validation rule type: '{}'", rule)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
            ConfigError::UnknownRuleType { .. } => "UNKNOWN_RULE_TYPE",
        }
    }
}

impl From<ConfigError> for TrellisError {
    fn from(err: ConfigError) -> Self {
        TrellisError::Config(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised while constructing or composing store modules
///
/// All of these are fail-fast configuration mistakes: they surface at
/// construction or composition time, never during dispatch.
#[derive(Debug)]
pub enum StoreError {
    /// A module was declared without a name
    MissingModuleName,

    /// A module was declared without any operations
    NoOperations { module: String },

    /// An operation name normalized to an empty string
    InvalidOperation { module: String, item: String },

    /// Two operations normalized to the same name
    DuplicateOperation { module: String, item: String },

    /// A custom constant collides with a generated one
    ConstantCollision { module: String, constant: String },

    /// A custom state field collides with a generated slice key
    StateKeyCollision { module: String, key: String },

    /// Two modules registered under the same name
    DuplicateModule { module: String },

    /// A handler targets a state slice its module does not declare
    UnknownSliceTarget {
        module: String,
        action: String,
        slice: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingModuleName => {
                write!(f, "Store module requires a non-empty name")
            }
            StoreError::NoOperations { module } => {
                write!(f, "Store module '{}' declares no operations", module)
            }
            StoreError::InvalidOperation { module, item } => {
                write!(
                    f,
                    "Operation '{}' in module '{}' is not a valid name",
                    item, module
                )
            }
            StoreError::DuplicateOperation { module, item } => {
                write!(
                    f,
                    "Operation '{}' is declared more than once in module '{}'",
                    item, module
                )
            }
            StoreError::ConstantCollision { module, constant } => {
                write!(
                    f,
                    "Custom constant '{}' collides with a generated constant in module '{}'",
                    constant, module
                )
            }
            StoreError::StateKeyCollision { module, key } => {
                write!(
                    f,
                    "Custom state field '{}' collides with a generated slice in module '{}'",
                    key, module
                )
            }
            StoreError::DuplicateModule { module } => {
                write!(f, "A module named '{}' is already registered", module)
            }
            StoreError::UnknownSliceTarget {
                module,
                action,
                slice,
            } => {
                write!(
                    f,
                    "Handler for '{}' in module '{}' targets unknown slice '{}'",
                    action, module, slice
                )
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::MissingModuleName => "MISSING_MODULE_NAME",
            StoreError::NoOperations { .. } => "NO_OPERATIONS",
            StoreError::InvalidOperation { .. } => "INVALID_OPERATION",
            StoreError::DuplicateOperation { .. } => "DUPLICATE_OPERATION",
            StoreError::ConstantCollision { .. } => "CONSTANT_COLLISION",
            StoreError::StateKeyCollision { .. } => "STATE_KEY_COLLISION",
            StoreError::DuplicateModule { .. } => "DUPLICATE_MODULE",
            StoreError::UnknownSliceTarget { .. } => "UNKNOWN_SLICE_TARGET",
        }
    }
}

impl From<StoreError> for TrellisError {
    fn from(err: StoreError) -> Self {
        TrellisError::Store(err)
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors related to the API client
#[derive(Debug)]
pub enum ClientError {
    /// The named endpoint is not declared in the client configuration
    UnknownEndpoint { endpoint: String },

    /// A path template references a parameter the payload does not provide
    MissingPathParameter { path: String, parameter: String },

    /// A path template is malformed (unbalanced braces)
    InvalidPathTemplate { path: String },

    /// The remote endpoint answered with a non-success status
    RequestFailed {
        endpoint: String,
        status: u16,
        message: String,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnknownEndpoint { endpoint } => {
                write!(f, "Unknown endpoint: '{}'", endpoint)
            }
            ClientError::MissingPathParameter { path, parameter } => {
                write!(
                    f,
                    "Path '{}' requires parameter '{}' but the payload does not provide a scalar value for it",
                    path, parameter
                )
            }
            ClientError::InvalidPathTemplate { path } => {
                write!(f, "Malformed path template: '{}'", path)
            }
            ClientError::RequestFailed {
                endpoint,
                status,
                message,
            } => {
                write!(
                    f,
                    "Request to endpoint '{}' failed with status {}: {}",
                    endpoint, status, message
                )
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::UnknownEndpoint { .. } => "UNKNOWN_ENDPOINT",
            ClientError::MissingPathParameter { .. } => "MISSING_PATH_PARAMETER",
            ClientError::InvalidPathTemplate { .. } => "INVALID_PATH_TEMPLATE",
            ClientError::RequestFailed { .. } => "REQUEST_FAILED",
        }
    }
}

impl From<ClientError> for TrellisError {
    fn from(err: ClientError) -> Self {
        TrellisError::Client(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for TrellisError {
    fn from(err: serde_json::Error) -> Self {
        TrellisError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for TrellisError {
    fn from(err: serde_yaml::Error) -> Self {
        TrellisError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for TrellisError {
    fn from(err: std::io::Error) -> Self {
        TrellisError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for trellis operations
pub type TrellisResult<T> = Result<T, TrellisError>;

// =============================================================================
// Tests
// =============================================================================
