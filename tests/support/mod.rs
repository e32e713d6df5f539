//! Scripted MMS transport for integration tests
//!
//! Stands in for a protocol backend: directory listings, object values and
//! dataset values are declared up front, and individual references can be
//! scripted to fail with a service code.
#![allow(dead_code)] // each integration test binary uses a subset

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_iec61850::{
    AcsiClass, ClientState, FunctionalConstraint, MmsTransport, MmsType, RawMmsValue, ServiceError,
};

/// Owned value tree handed out by the scripted transport
#[derive(Debug, Clone, PartialEq)]
pub enum TestValue {
    Boolean(bool),
    Float(f64),
    Integer(i64),
    Unsigned(i64),
    VisibleString(String),
    BitString(u32),
    UtcTime(u32),
    Structure(Vec<TestValue>),
    Array(Vec<TestValue>),
}

impl RawMmsValue for TestValue {
    fn mms_type(&self) -> MmsType {
        match self {
            TestValue::Boolean(_) => MmsType::Boolean,
            TestValue::Float(_) => MmsType::Float,
            TestValue::Integer(_) => MmsType::Integer,
            TestValue::Unsigned(_) => MmsType::Unsigned,
            TestValue::VisibleString(_) => MmsType::VisibleString,
            TestValue::BitString(_) => MmsType::BitString,
            TestValue::UtcTime(_) => MmsType::UtcTime,
            TestValue::Structure(_) => MmsType::Structure,
            TestValue::Array(_) => MmsType::Array,
        }
    }

    fn as_bool(&self) -> bool {
        matches!(self, TestValue::Boolean(true))
    }

    fn to_f64(&self) -> f64 {
        match self {
            TestValue::Float(v) => *v,
            _ => 0.0,
        }
    }

    fn to_i64(&self) -> i64 {
        match self {
            TestValue::Integer(v) | TestValue::Unsigned(v) => *v,
            _ => 0,
        }
    }

    fn string_value(&self) -> String {
        match self {
            TestValue::VisibleString(s) => s.clone(),
            _ => String::new(),
        }
    }

    fn bit_string_as_u32(&self) -> u32 {
        match self {
            TestValue::BitString(v) => *v,
            _ => 0,
        }
    }

    fn unix_timestamp(&self) -> u32 {
        match self {
            TestValue::UtcTime(v) => *v,
            _ => 0,
        }
    }

    fn element(&self, index: usize) -> Option<&dyn RawMmsValue> {
        match self {
            TestValue::Structure(items) | TestValue::Array(items) => {
                items.get(index).map(|v| v as &dyn RawMmsValue)
            }
            _ => None,
        }
    }
}

/// Scripted transport backend
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub state: ClientState,
    /// Service code returned by `connect`; `None` means success
    pub connect_error: Option<ServiceError>,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub device_list: Vec<String>,
    pub device_list_error: Option<ServiceError>,
    /// Logical node names per logical device
    pub device_dirs: HashMap<String, Vec<String>>,
    pub failing_device_dirs: HashMap<String, ServiceError>,
    /// Data object names per `LD/LN` reference
    pub node_dirs: HashMap<String, Vec<String>>,
    pub failing_node_dirs: HashMap<String, ServiceError>,
    /// Child attribute names per data reference; missing means terminal
    pub data_dirs: HashMap<String, Vec<String>>,
    pub failing_data_dirs: HashMap<String, ServiceError>,
    /// Values per object reference
    pub objects: HashMap<String, TestValue>,
    /// Member values per dataset reference
    pub datasets: HashMap<String, Vec<TestValue>>,
    pub closed: bool,
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: &str, nodes: &[&str]) -> Self {
        self.device_list.push(device.to_string());
        self.device_dirs.insert(device.to_string(), strings(nodes));
        self
    }

    pub fn with_data_objects(mut self, ln_ref: &str, objects: &[&str]) -> Self {
        self.node_dirs.insert(ln_ref.to_string(), strings(objects));
        self
    }

    pub fn with_data_dir(mut self, reference: &str, children: &[&str]) -> Self {
        self.data_dirs
            .insert(reference.to_string(), strings(children));
        self
    }

    pub fn with_object(mut self, reference: &str, value: TestValue) -> Self {
        self.objects.insert(reference.to_string(), value);
        self
    }

    pub fn with_dataset(mut self, reference: &str, values: Vec<TestValue>) -> Self {
        self.datasets.insert(reference.to_string(), values);
        self
    }
}

#[async_trait]
impl MmsTransport for ScriptedTransport {
    type Value = TestValue;

    async fn connect(&mut self, _host: &str, _port: u16) -> Result<(), ServiceError> {
        match self.connect_error {
            Some(code) => Err(code),
            None => {
                self.state = ClientState::Connected;
                Ok(())
            }
        }
    }

    fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = Some(timeout);
    }

    fn set_request_timeout(&mut self, timeout: Duration) {
        self.request_timeout = Some(timeout);
    }

    fn state(&self) -> ClientState {
        self.state
    }

    async fn read_object(
        &mut self,
        object_ref: &str,
        _fc: FunctionalConstraint,
    ) -> Result<Self::Value, ServiceError> {
        self.objects
            .get(object_ref)
            .cloned()
            .ok_or(ServiceError::ObjectDoesNotExist)
    }

    async fn read_dataset_values(
        &mut self,
        dataset_ref: &str,
    ) -> Result<Vec<Self::Value>, ServiceError> {
        self.datasets
            .get(dataset_ref)
            .cloned()
            .ok_or(ServiceError::ObjectDoesNotExist)
    }

    async fn logical_device_list(&mut self) -> Result<Vec<String>, ServiceError> {
        match self.device_list_error {
            Some(code) => Err(code),
            None => Ok(self.device_list.clone()),
        }
    }

    async fn logical_device_directory(
        &mut self,
        device: &str,
    ) -> Result<Vec<String>, ServiceError> {
        if let Some(code) = self.failing_device_dirs.get(device) {
            return Err(*code);
        }
        Ok(self.device_dirs.get(device).cloned().unwrap_or_default())
    }

    async fn logical_node_directory(
        &mut self,
        ln_ref: &str,
        _class: AcsiClass,
    ) -> Result<Vec<String>, ServiceError> {
        if let Some(code) = self.failing_node_dirs.get(ln_ref) {
            return Err(*code);
        }
        Ok(self.node_dirs.get(ln_ref).cloned().unwrap_or_default())
    }

    async fn data_directory(&mut self, reference: &str) -> Result<Vec<String>, ServiceError> {
        if let Some(code) = self.failing_data_dirs.get(reference) {
            return Err(*code);
        }
        Ok(self.data_dirs.get(reference).cloned().unwrap_or_default())
    }

    async fn close(&mut self) {
        self.state = ClientState::Closed;
        self.closed = true;
    }
}
