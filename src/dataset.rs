//! Dataset value explanation
//!
//! Dataset reads come back as a positional sequence of values with no name
//! tags on the wire. This module reconciles such a sequence against the
//! SCL-declared dataset shape, producing fully qualified object references
//! for every final value. Reconciliation is a pure function over the two
//! parallel sequences; nothing here touches the connection.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::common::{IedError, IedResult};
use crate::mms::{MmsType, MmsValue};
use crate::scl::{Da, DataSetDetail};

/// Non-fatal inconsistency found while explaining a dataset
///
/// Each diagnostic names the reference it affected; the remaining entries of
/// the dataset are still explained.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum DataSetDiagnostic {
    /// No MX/ST-declared attribute name exists at this member position;
    /// the zero-based index was used as the reference segment instead
    #[error("no declared attribute name for member {index} of {reference}")]
    UnresolvedAttributeName { reference: String, index: usize },

    /// A nested wrapper structure did not contain exactly one element;
    /// the reference was skipped
    #[error("wrapper at {reference} has {len} elements, expected 1")]
    WrapperArity { reference: String, len: usize },

    /// An FCDA entry without a DA name must decode to a structure;
    /// the entry was skipped
    #[error("branch entry {reference} decoded to {mms_type}, expected a structure")]
    BranchNotStructure {
        reference: String,
        mms_type: MmsType,
    },
}

/// Result of reconciling one dataset read against its declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSetExplanation {
    /// Fully qualified reference to final value
    pub points: HashMap<String, MmsValue>,
    /// Inconsistencies encountered along the way, in traversal order
    pub diagnostics: Vec<DataSetDiagnostic>,
}

/// Declared attribute name at a member position
///
/// Dataset members only cover measurand (`MX`) and status (`ST`) attributes,
/// so the position counts those declarations alone. Returns `None` when the
/// filtered list is shorter than `index + 1`.
pub fn find_da_name(das: &[Da], index: usize) -> Option<&str> {
    let mut real_index = 0;
    for da in das {
        if da.fc != "MX" && da.fc != "ST" {
            continue;
        }
        if real_index == index {
            return Some(&da.name);
        }
        real_index += 1;
    }
    None
}

/// Reconcile dataset values with their SCL declaration
///
/// `values` must line up one-to-one with the declared FCDA entries; any
/// length disagreement means the device model and the station description
/// have diverged and fails with [`IedError::ModelMismatch`]. Structural
/// inconsistencies inside a single entry are reported as diagnostics and do
/// not abort the remaining entries.
pub fn explain_dataset_values(
    values: &[MmsValue],
    dset: &DataSetDetail,
) -> IedResult<DataSetExplanation> {
    if dset.fcda.len() != values.len() {
        return Err(IedError::ModelMismatch {
            expected: dset.fcda.len(),
            actual: values.len(),
        });
    }

    let mut explanation = DataSetExplanation::default();

    for (entry, value) in dset.fcda.iter().zip(values) {
        let base = entry.reference_base(&dset.ied_name);

        if !entry.da_name.is_empty() {
            // Explicit DA entry: the value is stored as-is. A structure here
            // means the template addressed a branch as a leaf; the caller
            // detects that from the stored value.
            explanation
                .points
                .insert(format!("{}.{}", base, entry.da_name), value.clone());
            continue;
        }

        let Some(children) = value.children() else {
            warn!(reference = %base, mms_type = %value.mms_type(), "branch entry is not a structure");
            explanation.diagnostics.push(DataSetDiagnostic::BranchNotStructure {
                reference: base,
                mms_type: value.mms_type(),
            });
            continue;
        };

        let das = dset
            .do_type(&entry.prefix, &entry.ln_class, &entry.do_name)
            .map(|dotyp| dotyp.da.as_slice())
            .unwrap_or_default();

        for (index, child) in children.iter().enumerate() {
            let reference = match find_da_name(das, index) {
                Some(name) => format!("{}.{}", base, name),
                None => {
                    let reference = format!("{}.{}", base, index);
                    warn!(reference = %reference, index, "no declared DA name, using member index");
                    explanation
                        .diagnostics
                        .push(DataSetDiagnostic::UnresolvedAttributeName {
                            reference: reference.clone(),
                            index,
                        });
                    reference
                }
            };

            // Single-element wrappers are transparent; any other arity is a
            // model inconsistency and the reference is dropped.
            let resolved = match child.children() {
                Some(inner) if inner.len() == 1 => inner[0].clone(),
                Some(inner) => {
                    warn!(reference = %reference, len = inner.len(), "unexpected wrapper arity");
                    explanation.diagnostics.push(DataSetDiagnostic::WrapperArity {
                        reference,
                        len: inner.len(),
                    });
                    continue;
                }
                None => child.clone(),
            };

            explanation.points.insert(reference, resolved);
        }
    }

    Ok(explanation)
}
