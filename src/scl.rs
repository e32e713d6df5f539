//! SCL structural model types
//!
//! In-memory form of a station description: the device hierarchy
//! (IED / access point / logical device / logical node / DOI / DAI / SDI)
//! plus the dataset declarations the explainer reconciles against. Parsing
//! the SCL XML itself is the station-configuration loader's job; this crate
//! only consumes (and, when browsing a live device, produces) these types.
use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Root of an SCL document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scl {
    pub ied: Vec<Ied>,
}

/// One intelligent electronic device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ied {
    pub name: String,
    pub access_point: Vec<AccessPoint>,
}

/// Communication access point of an IED
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub name: String,
    pub ldevice: Vec<LDevice>,
}

/// Logical device instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LDevice {
    pub inst: String,
    pub ln: Vec<Ln>,
}

/// Logical node instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ln {
    pub inst: String,
    pub doi: Vec<Doi>,
}

/// Data object instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doi {
    pub name: String,
    pub dai: Vec<Dai>,
}

/// Data attribute instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dai {
    pub name: String,
    pub val: Val,
    pub sdi: Vec<Sdi>,
}

/// Sub data instance (nested structured attribute)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sdi {
    pub name: String,
    pub dai: Vec<Dai>,
    pub sdi: Vec<Sdi>,
}

/// Configured attribute value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Val {
    pub value: String,
}

/// Declared data attribute of a data object type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Da {
    pub name: String,
    /// Functional constraint tag as written in the SCL (`"MX"`, `"ST"`, ...)
    pub fc: String,
}

/// Data object type template: the ordered attribute list of one DO class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoType {
    pub id: String,
    pub da: Vec<Da>,
}

/// One FCDA entry of a dataset declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fcda {
    pub ld_inst: String,
    pub prefix: String,
    pub ln_class: String,
    pub ln_inst: String,
    pub do_name: String,
    /// Empty when the entry addresses the whole data object
    pub da_name: String,
    pub fc: String,
}

impl Fcda {
    /// Fully qualified reference of this entry without a DA segment:
    /// `{ied}{ldInst}/{prefix}{lnClass}{lnInst}.{doName}`
    pub fn reference_base(&self, ied_name: &str) -> String {
        format!(
            "{}{}/{}{}{}.{}",
            ied_name, self.ld_inst, self.prefix, self.ln_class, self.ln_inst, self.do_name
        )
    }
}

/// Declared dataset: ordered FCDA entries plus the DO type templates needed
/// to name structural members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSetDetail {
    pub ied_name: String,
    pub name: String,
    pub fcda: Vec<Fcda>,
    /// DO type templates keyed by [`do_type_key`]
    pub do_types: HashMap<String, DoType>,
}

/// Lookup key for a DO type template within one dataset declaration
pub fn do_type_key(prefix: &str, ln_class: &str, do_name: &str) -> String {
    format!("{}{}.{}", prefix, ln_class, do_name)
}

impl DataSetDetail {
    /// DO type template for one data object, if the SCL declares it
    pub fn do_type(&self, prefix: &str, ln_class: &str, do_name: &str) -> Option<&DoType> {
        self.do_types.get(&do_type_key(prefix, ln_class, do_name))
    }
}

impl Scl {
    /// Human-readable dump of the device hierarchy
    pub fn render(&self) -> String {
        let mut out = String::new();
        for ied in &self.ied {
            let _ = writeln!(out, "IED: {}", ied.name);
            for ap in &ied.access_point {
                let _ = writeln!(out, "  AP: {}", ap.name);
                for ld in &ap.ldevice {
                    let _ = writeln!(out, "    LD: {}", ld.inst);
                    for ln in &ld.ln {
                        let _ = writeln!(out, "      LN: {}", ln.inst);
                        for doi in &ln.doi {
                            let _ = writeln!(out, "        DOI: {}", doi.name);
                            for dai in &doi.dai {
                                render_dai(&mut out, dai, 10);
                            }
                        }
                    }
                }
            }
        }
        out
    }
}

fn render_dai(out: &mut String, dai: &Dai, indent: usize) {
    let _ = writeln!(out, "{:indent$}DAI: {}", "", dai.name, indent = indent);
    for sdi in &dai.sdi {
        render_sdi(out, sdi, indent + 2);
    }
}

fn render_sdi(out: &mut String, sdi: &Sdi, indent: usize) {
    let _ = writeln!(out, "{:indent$}SDI: {}", "", sdi.name, indent = indent);
    for dai in &sdi.dai {
        render_dai(out, dai, indent + 2);
    }
    for child in &sdi.sdi {
        render_sdi(out, child, indent + 2);
    }
}
