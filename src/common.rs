//! IEC 61850 Constants and Common Data Types
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection state of an IED client session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientState {
    /// No active association
    #[default]
    Closed,
    /// TCP/MMS association being established
    Connecting,
    /// Association established, services available
    Connected,
    /// Association shutting down
    Closing,
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientState::Closed => write!(f, "CLOSED"),
            ClientState::Connecting => write!(f, "CONNECTING"),
            ClientState::Connected => write!(f, "CONNECTED"),
            ClientState::Closing => write!(f, "CLOSING"),
        }
    }
}

/// Functional constraint qualifying a data attribute access
///
/// Only the constraints used by the read/browse services are listed;
/// `All` maps to the wildcard constraint of the ACSI services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionalConstraint {
    /// Status information
    St,
    /// Measurands (analogue values)
    Mx,
    /// Setpoints
    Sp,
    /// Substitution
    Sv,
    /// Configuration
    Cf,
    /// Description
    Dc,
    /// Setting group
    Sg,
    /// Control
    Co,
    /// All functional constraints (wildcard)
    All,
}

impl FunctionalConstraint {
    /// Two-letter SCL tag for this constraint
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionalConstraint::St => "ST",
            FunctionalConstraint::Mx => "MX",
            FunctionalConstraint::Sp => "SP",
            FunctionalConstraint::Sv => "SV",
            FunctionalConstraint::Cf => "CF",
            FunctionalConstraint::Dc => "DC",
            FunctionalConstraint::Sg => "SG",
            FunctionalConstraint::Co => "CO",
            FunctionalConstraint::All => "ALL",
        }
    }
}

impl fmt::Display for FunctionalConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ACSI object class selector for logical node directory queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcsiClass {
    /// Data objects of a logical node
    DataObject,
    /// Data sets of a logical node
    DataSet,
    /// Buffered report control blocks
    Brcb,
    /// Unbuffered report control blocks
    Urcb,
    /// Log control blocks
    Lcb,
}

/// Service-level status code reported by the MMS transport
///
/// Mirrors the client error codes of the underlying protocol stack. `Ok`
/// never reaches callers of this crate; transports report it implicitly by
/// returning `Ok(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ServiceError {
    #[error("already connected")]
    AlreadyConnected,
    #[error("not connected")]
    NotConnected,
    #[error("connection rejected")]
    ConnectionRejected,
    #[error("connection lost")]
    ConnectionLost,
    #[error("request timed out")]
    Timeout,
    #[error("access denied")]
    AccessDenied,
    #[error("object does not exist")]
    ObjectDoesNotExist,
    #[error("object access unsupported")]
    ObjectAccessUnsupported,
    #[error("type inconsistent")]
    TypeInconsistent,
    #[error("service error code {0}")]
    Other(i32),
}

/// IEC 61850 client error types
#[derive(Debug, Error)]
pub enum IedError {
    /// Association could not be established
    #[error("failed to connect to {endpoint}: {code}")]
    Connect {
        endpoint: String,
        code: ServiceError,
    },

    /// A read service failed for one object reference
    #[error("failed to read object {object_ref}: {code}")]
    Read {
        object_ref: String,
        code: ServiceError,
    },

    /// A directory service failed for one reference
    #[error("failed to browse {reference}: {code}")]
    Directory {
        reference: String,
        code: ServiceError,
    },

    /// A decoded value did not carry the requested type
    #[error("object {object_ref}: expected {expected}, got {got}")]
    DataConversion {
        object_ref: String,
        expected: String,
        got: String,
    },

    /// Dataset runtime shape disagrees with the declared SCL shape
    #[error("dataset model mismatch: template declares {expected} entries, device returned {actual}")]
    ModelMismatch { expected: usize, actual: usize },

    /// Operation requires an established association
    #[error("client not connected")]
    NotConnected,
}

/// Common result type for IEC 61850 operations
pub type IedResult<T> = Result<T, IedError>;
