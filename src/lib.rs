//! # rust-iec61850
//!
//! A Rust client for the IEC 61850 MMS data model, for substation and
//! power-plant automation systems.
//!
//! The crate covers the data-model side of an IED association: typed reads,
//! dataset reads, live model discovery, and the reconciliation of dataset
//! values against an SCL station description so callers get fully qualified
//! object references instead of positional blobs. The MMS wire protocol
//! itself is pluggable behind the [`transport::MmsTransport`] trait, and SCL
//! XML parsing is left to the station-configuration loader.
//!
//! ## Features
//!
//! - Asynchronous API using Tokio
//! - Closed, type-safe MMS value model with recursive structure decoding
//! - Dataset explanation: positional values resolved to `IED/LD.LN.DO.DA`
//!   references via the declared SCL dataset shape
//! - Model browsing with partial-failure tolerance and an SCL round-trip
//! - Comprehensive error handling
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use rust_iec61850::{FunctionalConstraint, IedClient, IedClientConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IedClientConfig::new()
//!         .connect_timeout(Duration::from_secs(10))
//!         .request_timeout(Duration::from_secs(5));
//!
//!     // `transport` is any MmsTransport implementation
//!     let mut client = IedClient::new(transport, config);
//!     client.connect("192.168.1.100", 102).await?;
//!
//!     let total_w = client
//!         .read_float("IED1LD0/MMXU1.TotW.mag", FunctionalConstraint::Mx)
//!         .await?;
//!     println!("TotW = {}", total_w);
//!
//!     // Resolve a dataset read against the station description
//!     let values = client.read_dataset_values("IED1LD0/LLN0.dsAin").await?;
//!     let explained = client.explain_dataset_values(&values, &dataset_detail)?;
//!     for (reference, value) in &explained.points {
//!         println!("{} = {:?}", reference, value);
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod common;
pub mod dataset;
pub mod mms;
pub mod model;
pub mod scl;
pub mod transport;

// Re-export common types for convenience
pub use crate::client::{IedClient, IedClientConfig};
pub use crate::common::{
    AcsiClass, ClientState, FunctionalConstraint, IedError, IedResult, ServiceError,
};
pub use crate::dataset::{
    explain_dataset_values, find_da_name, DataSetDiagnostic, DataSetExplanation,
};
pub use crate::mms::{decode_value, MmsType, MmsValue};
pub use crate::model::{browse_model, browse_model_to_scl, BrowseDiagnostic, BrowseReport};
pub use crate::transport::{MmsTransport, RawMmsValue};
