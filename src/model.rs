//! Live device model discovery
//!
//! Walks a connected server's object directory: logical devices, their
//! logical nodes, the data objects of each node, and data attributes
//! recursively until a directory comes back empty. One walk yields both a
//! structural tree and the flat indented trace commissioning tools print.
//! A directory failure on one branch is recorded and the walk continues
//! with the siblings.
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::common::{AcsiClass, IedError, IedResult, ServiceError};
use crate::scl::{AccessPoint, Dai, Doi, Ied, LDevice, Ln, Scl, Sdi, Val};
use crate::transport::MmsTransport;

/// Data attribute with its nested attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataAttributeNode {
    pub name: String,
    pub children: Vec<DataAttributeNode>,
}

/// Data object and its attribute tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataObjectNode {
    pub name: String,
    pub attributes: Vec<DataAttributeNode>,
}

/// Logical node and its data objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalNodeDir {
    pub name: String,
    pub data_objects: Vec<DataObjectNode>,
}

/// Logical device and its logical nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalDeviceDir {
    pub name: String,
    pub logical_nodes: Vec<LogicalNodeDir>,
}

/// A directory service failure that did not abort the walk
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("failed to browse {reference}: {code}")]
pub struct BrowseDiagnostic {
    pub reference: String,
    pub code: ServiceError,
}

/// Result of one model walk: the discovered tree, the flat trace, and the
/// branches that could not be read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseReport {
    pub devices: Vec<LogicalDeviceDir>,
    /// One line per visited node, indented by depth (`LD:`/`LN:`/`DO:`/`DA:`)
    pub trace: Vec<String>,
    pub diagnostics: Vec<BrowseDiagnostic>,
}

impl BrowseReport {
    /// The trace as one printable block
    pub fn render_trace(&self) -> String {
        let mut out = self.trace.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Walk the server's full object directory
///
/// Fails only when the logical device list itself cannot be read; every
/// deeper failure becomes a [`BrowseDiagnostic`] and the walk continues.
pub async fn browse_model<T: MmsTransport>(transport: &mut T) -> IedResult<BrowseReport> {
    let devices = transport
        .logical_device_list()
        .await
        .map_err(|code| IedError::Directory {
            reference: "/".to_string(),
            code,
        })?;

    let mut report = BrowseReport::default();

    for device in devices {
        report.trace.push(format!("LD: {}", device));
        let mut ld = LogicalDeviceDir {
            name: device.clone(),
            logical_nodes: Vec::new(),
        };

        let nodes = match transport.logical_device_directory(&device).await {
            Ok(nodes) => nodes,
            Err(code) => {
                warn!(device = %device, %code, "failed to retrieve logical nodes");
                report.diagnostics.push(BrowseDiagnostic {
                    reference: device.clone(),
                    code,
                });
                report.devices.push(ld);
                continue;
            }
        };

        for node in nodes {
            report.trace.push(format!("  LN: {}", node));
            let mut ln = LogicalNodeDir {
                name: node.clone(),
                data_objects: Vec::new(),
            };

            let ln_ref = format!("{}/{}", device, node);
            let objects = match transport
                .logical_node_directory(&ln_ref, AcsiClass::DataObject)
                .await
            {
                Ok(objects) => objects,
                Err(code) => {
                    warn!(reference = %ln_ref, %code, "failed to retrieve data objects");
                    report.diagnostics.push(BrowseDiagnostic {
                        reference: ln_ref.clone(),
                        code,
                    });
                    ld.logical_nodes.push(ln);
                    continue;
                }
            };

            for object in objects {
                report.trace.push(format!("    DO: {}", object));
                let do_ref = format!("{}/{}.{}", device, node, object);
                let attributes = browse_attributes(
                    transport,
                    do_ref,
                    6,
                    &mut report.trace,
                    &mut report.diagnostics,
                )
                .await;
                ln.data_objects.push(DataObjectNode {
                    name: object,
                    attributes,
                });
            }

            ld.logical_nodes.push(ln);
        }

        report.devices.push(ld);
    }

    Ok(report)
}

/// Recursive data attribute descent; terminates when a directory is empty
fn browse_attributes<'a, T: MmsTransport>(
    transport: &'a mut T,
    reference: String,
    depth: usize,
    trace: &'a mut Vec<String>,
    diagnostics: &'a mut Vec<BrowseDiagnostic>,
) -> BoxFuture<'a, Vec<DataAttributeNode>> {
    Box::pin(async move {
        let names = match transport.data_directory(&reference).await {
            Ok(names) => names,
            Err(code) => {
                warn!(reference = %reference, %code, "failed to retrieve data attributes");
                diagnostics.push(BrowseDiagnostic { reference, code });
                return Vec::new();
            }
        };

        let mut attributes = Vec::new();
        for name in names {
            trace.push(format!("{:depth$}DA: {}", "", name, depth = depth));
            let child_ref = format!("{}.{}", reference, name);
            let children =
                browse_attributes(transport, child_ref, depth + 2, trace, diagnostics).await;
            attributes.push(DataAttributeNode { name, children });
        }
        attributes
    })
}

/// Walk the server's object directory into the SCL schema shape
///
/// The discovered model round-trips into the same structures a station
/// description loader produces: one IED per logical device with a single
/// `<name>_AP` access point. Attribute values are not read while browsing,
/// so every DAI carries an empty [`Val`].
pub async fn browse_model_to_scl<T: MmsTransport>(transport: &mut T) -> IedResult<Scl> {
    let devices = transport
        .logical_device_list()
        .await
        .map_err(|code| IedError::Directory {
            reference: "/".to_string(),
            code,
        })?;

    let mut scl = Scl::default();

    for device in devices {
        let mut ldevice = LDevice {
            inst: device.clone(),
            ln: Vec::new(),
        };

        let nodes = match transport.logical_device_directory(&device).await {
            Ok(nodes) => nodes,
            Err(code) => {
                warn!(device = %device, %code, "failed to retrieve logical nodes");
                continue;
            }
        };

        for node in nodes {
            let mut ln = Ln {
                inst: node.clone(),
                doi: Vec::new(),
            };

            let ln_ref = format!("{}/{}", device, node);
            let objects = match transport
                .logical_node_directory(&ln_ref, AcsiClass::DataObject)
                .await
            {
                Ok(objects) => objects,
                Err(code) => {
                    warn!(reference = %ln_ref, %code, "failed to retrieve data objects");
                    Vec::new()
                }
            };

            for object in objects {
                let do_ref = format!("{}/{}.{}", device, node, object);
                ln.doi.push(Doi {
                    name: object,
                    dai: browse_dai_scl(transport, do_ref).await,
                });
            }

            ldevice.ln.push(ln);
        }

        scl.ied.push(Ied {
            name: device.clone(),
            access_point: vec![AccessPoint {
                name: format!("{}_AP", device),
                ldevice: vec![ldevice],
            }],
        });
    }

    Ok(scl)
}

fn browse_dai_scl<'a, T: MmsTransport>(
    transport: &'a mut T,
    reference: String,
) -> BoxFuture<'a, Vec<Dai>> {
    Box::pin(async move {
        let names = match transport.data_directory(&reference).await {
            Ok(names) => names,
            Err(code) => {
                warn!(reference = %reference, %code, "failed to retrieve DAIs");
                return Vec::new();
            }
        };

        let mut dais = Vec::new();
        for name in names {
            let child_ref = format!("{}.{}", reference, name);
            dais.push(Dai {
                name,
                val: Val::default(),
                sdi: browse_sdi_scl(transport, child_ref).await,
            });
        }
        dais
    })
}

fn browse_sdi_scl<'a, T: MmsTransport>(
    transport: &'a mut T,
    reference: String,
) -> BoxFuture<'a, Vec<Sdi>> {
    Box::pin(async move {
        let names = match transport.data_directory(&reference).await {
            Ok(names) => names,
            Err(code) => {
                warn!(reference = %reference, %code, "failed to retrieve SDIs");
                return Vec::new();
            }
        };

        let mut sdis = Vec::new();
        for name in names {
            let child_ref = format!("{}.{}", reference, name);
            sdis.push(Sdi {
                name,
                dai: browse_dai_scl(transport, child_ref.clone()).await,
                sdi: browse_sdi_scl(transport, child_ref).await,
            });
        }
        sdis
    })
}
