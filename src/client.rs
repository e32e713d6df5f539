//! IEC 61850 client
//!
//! High-level session over an [`MmsTransport`]: association lifecycle,
//! typed scalar reads, dataset reads and model browsing. One client owns one
//! association for its whole lifetime; all services are plain request/
//! response calls that block the caller until the server answers or the
//! configured timeout elapses.
use std::time::Duration;

use crate::common::{ClientState, FunctionalConstraint, IedError, IedResult, ServiceError};
use crate::dataset::{explain_dataset_values, DataSetExplanation};
use crate::mms::{decode_value, MmsValue};
use crate::model::{browse_model, browse_model_to_scl, BrowseReport};
use crate::scl::{DataSetDetail, Scl};
use crate::transport::MmsTransport;

/// IED client configuration
#[derive(Debug, Clone, Default)]
pub struct IedClientConfig {
    /// Timeout for association establishment; `None` keeps the transport
    /// default
    pub connect_timeout: Option<Duration>,
    /// Timeout for each confirmed service request; `None` keeps the
    /// transport default
    pub request_timeout: Option<Duration>,
    /// Substitute 0 for quality bit strings and UTC timestamps instead of
    /// decoding them
    pub without_timestamps: bool,
}

impl IedClientConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the association establishment timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Suppress timestamp and quality decoding
    pub fn without_timestamps(mut self, flag: bool) -> Self {
        self.without_timestamps = flag;
        self
    }
}

/// Client session over one MMS association
#[derive(Debug)]
pub struct IedClient<T: MmsTransport> {
    transport: T,
    without_timestamps: bool,
}

impl<T: MmsTransport> IedClient<T> {
    /// Create a client over `transport`, applying the configured timeouts
    pub fn new(mut transport: T, config: IedClientConfig) -> Self {
        if let Some(timeout) = config.connect_timeout {
            transport.set_connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            transport.set_request_timeout(timeout);
        }
        Self {
            transport,
            without_timestamps: config.without_timestamps,
        }
    }

    /// Establish the association
    ///
    /// An already-established association is not an error; every other
    /// failure carries the endpoint and the service code.
    pub async fn connect(&mut self, host: &str, port: u16) -> IedResult<()> {
        match self.transport.connect(host, port).await {
            Ok(()) | Err(ServiceError::AlreadyConnected) => Ok(()),
            Err(code) => Err(IedError::Connect {
                endpoint: format!("{}:{}", host, port),
                code,
            }),
        }
    }

    /// Current association state
    pub fn state(&self) -> ClientState {
        self.transport.state()
    }

    /// Access the underlying transport, e.g. for backend-specific services
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read one object and decode it into an owned value tree
    pub async fn read_value(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<MmsValue> {
        let raw = self
            .transport
            .read_object(object_ref, fc)
            .await
            .map_err(|code| IedError::Read {
                object_ref: object_ref.to_string(),
                code,
            })?;
        Ok(decode_value(&raw, self.without_timestamps))
    }

    /// Read a boolean attribute
    pub async fn read_boolean(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<bool> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::Boolean(v) => Ok(v),
            other => Err(conversion_error(object_ref, "BOOLEAN", &other)),
        }
    }

    /// Read a floating point attribute
    pub async fn read_float(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<f64> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::Float(v) => Ok(v),
            other => Err(conversion_error(object_ref, "FLOAT", &other)),
        }
    }

    /// Read a string attribute
    pub async fn read_string(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<String> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::String(s) | MmsValue::VisibleString(s) => Ok(s),
            other => Err(conversion_error(object_ref, "STRING", &other)),
        }
    }

    /// Read a 32-bit signed integer attribute
    pub async fn read_i32(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<i32> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => i32::try_from(v)
                .map_err(|_| conversion_error(object_ref, "INTEGER32", &MmsValue::Integer(v))),
            other => Err(conversion_error(object_ref, "INTEGER32", &other)),
        }
    }

    /// Read a 64-bit signed integer attribute
    pub async fn read_i64(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<i64> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => Ok(v),
            other => Err(conversion_error(object_ref, "INTEGER64", &other)),
        }
    }

    /// Read a 32-bit unsigned integer attribute
    pub async fn read_u32(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> IedResult<u32> {
        match self.read_value(object_ref, fc).await? {
            MmsValue::Integer(v) | MmsValue::Unsigned(v) => u32::try_from(v)
                .map_err(|_| conversion_error(object_ref, "UNSIGNED32", &MmsValue::Unsigned(v))),
            other => Err(conversion_error(object_ref, "UNSIGNED32", &other)),
        }
    }

    /// Read all member values of a dataset, in declared order
    pub async fn read_dataset_values(&mut self, dataset_ref: &str) -> IedResult<Vec<MmsValue>> {
        let raw_values = self
            .transport
            .read_dataset_values(dataset_ref)
            .await
            .map_err(|code| IedError::Read {
                object_ref: dataset_ref.to_string(),
                code,
            })?;
        Ok(raw_values
            .iter()
            .map(|raw| decode_value(raw, self.without_timestamps))
            .collect())
    }

    /// Reconcile dataset values with their SCL declaration
    ///
    /// See [`explain_dataset_values`]; exposed on the client for symmetry
    /// with [`IedClient::read_dataset_values`].
    pub fn explain_dataset_values(
        &self,
        values: &[MmsValue],
        dset: &DataSetDetail,
    ) -> IedResult<DataSetExplanation> {
        explain_dataset_values(values, dset)
    }

    /// Walk the server's object directory
    pub async fn browse_model(&mut self) -> IedResult<BrowseReport> {
        browse_model(&mut self.transport).await
    }

    /// Walk the server's object directory into the SCL schema shape
    pub async fn browse_model_to_scl(&mut self) -> IedResult<Scl> {
        browse_model_to_scl(&mut self.transport).await
    }

    /// Release the association
    ///
    /// Safe to call whether or not the association ever came up.
    pub async fn close(&mut self) {
        self.transport.close().await;
    }
}

fn conversion_error(object_ref: &str, expected: &str, got: &MmsValue) -> IedError {
    IedError::DataConversion {
        object_ref: object_ref.to_string(),
        expected: expected.to_string(),
        got: got.mms_type().to_string(),
    }
}
