//! MMS transport and value-access seams
//!
//! The wire protocol itself (MMS encoding, COTP/TPKT session handling) is
//! not implemented here. This module defines the traits a protocol backend
//! implements so the client, model walker and dataset explainer can run on
//! top of any MMS stack, including scripted stand-ins in tests.
use std::time::Duration;

use async_trait::async_trait;

use crate::common::{AcsiClass, ClientState, FunctionalConstraint, ServiceError};
use crate::mms::MmsType;

/// Read access to one decoded protocol value
///
/// Implementations typically wrap a handle owned by the protocol stack.
/// Every accessor that hands out variable-length data returns an owned copy:
/// the handle's backing buffers die with the protocol container, so nothing
/// borrowed from it may outlive a decode call.
pub trait RawMmsValue {
    /// Declared type tag of this value
    fn mms_type(&self) -> MmsType;

    /// Boolean payload (valid when the tag is `Boolean`)
    fn as_bool(&self) -> bool;

    /// Floating point payload (valid when the tag is `Float`)
    fn to_f64(&self) -> f64;

    /// Integer payload, also used for `Unsigned` tags
    fn to_i64(&self) -> i64;

    /// Owned copy of a string payload
    fn string_value(&self) -> String;

    /// Bit string payload collapsed to its integer representation
    fn bit_string_as_u32(&self) -> u32;

    /// UTC time payload as Unix seconds
    fn unix_timestamp(&self) -> u32;

    /// Child at `index` for `Structure`/`Array` tags, `None` past the end
    /// (and always `None` for scalar tags)
    fn element(&self, index: usize) -> Option<&dyn RawMmsValue>;
}

/// Client-side MMS service interface of one IED association
///
/// One transport instance is one association: methods take `&mut self`, so a
/// connection handle cannot be shared between callers without external
/// serialization. Directory listings are returned as owned strings for the
/// same lifetime reason as [`RawMmsValue`] string payloads.
#[async_trait]
pub trait MmsTransport: Send {
    /// Value handle type produced by read services
    type Value: RawMmsValue + Send;

    /// Establish the association
    ///
    /// Transports report `ServiceError::AlreadyConnected` when an
    /// association is already up; the client treats that as success.
    async fn connect(&mut self, host: &str, port: u16) -> Result<(), ServiceError>;

    /// Timeout for association establishment
    fn set_connect_timeout(&mut self, timeout: Duration);

    /// Timeout applied to each confirmed service request
    fn set_request_timeout(&mut self, timeout: Duration);

    /// Current association state
    fn state(&self) -> ClientState;

    /// Read one data attribute or data object under a functional constraint
    async fn read_object(
        &mut self,
        object_ref: &str,
        fc: FunctionalConstraint,
    ) -> Result<Self::Value, ServiceError>;

    /// Read all member values of a dataset, in declared order
    async fn read_dataset_values(
        &mut self,
        dataset_ref: &str,
    ) -> Result<Vec<Self::Value>, ServiceError>;

    /// Names of the server's logical devices
    async fn logical_device_list(&mut self) -> Result<Vec<String>, ServiceError>;

    /// Logical node names of one logical device
    async fn logical_device_directory(
        &mut self,
        device: &str,
    ) -> Result<Vec<String>, ServiceError>;

    /// Directory of one logical node, filtered by ACSI object class
    async fn logical_node_directory(
        &mut self,
        ln_ref: &str,
        class: AcsiClass,
    ) -> Result<Vec<String>, ServiceError>;

    /// Child attribute names of a data object or data attribute;
    /// empty for a terminal attribute
    async fn data_directory(&mut self, reference: &str) -> Result<Vec<String>, ServiceError>;

    /// Release the association
    ///
    /// Must be safe to call when the association never came up, and after a
    /// previous `close`.
    async fn close(&mut self);
}
