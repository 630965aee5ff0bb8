//! Contract ABI schemas: typed message layouts and error code mappings.
//!
//! These mirror the shape of ABI dumps produced by contract tooling. The
//! registry is supplied by the caller and only queried here; the renderer
//! never owns or mutates contract metadata.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Field kinds; only `simple` fields participate in decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Simple,
    #[serde(other)]
    Unknown,
}

fn default_kind() -> FieldKind {
    FieldKind::Simple
}

/// Closed set of decodable field types. Unrecognised tags deserialize to
/// `Unknown`, so ABI dumps from newer tooling never break decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTypeTag {
    Uint,
    Int,
    Address,
    Bool,
    Cell,
    Slice,
    #[serde(other)]
    Unknown,
}

/// Field format: either an explicit bit width or a named layout tag such as
/// `"coins"` or `"remainder"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldFormat {
    Bits(u32),
    Tag(String),
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFormat::Bits(bits) => write!(f, "{bits}"),
            FieldFormat::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// One named, typed field in a message layout. Order within
/// [`TypeSchema::fields`] is the decode order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: FieldKind,
    #[serde(rename = "type")]
    pub type_tag: FieldTypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
    #[serde(default)]
    pub optional: bool,
}

/// A message type: its 32-bit header code, human name and field layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeSchema {
    pub header: u32,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// Per-contract ABI: message type schemas plus exit-code messages.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContractAbi {
    #[serde(default)]
    pub types: Vec<TypeSchema>,
    #[serde(default)]
    pub errors: BTreeMap<i64, String>,
}

impl ContractAbi {
    /// Find the message type whose header matches the given operation code.
    pub fn type_by_header(&self, header: u32) -> Option<&TypeSchema> {
        self.types.iter().find(|t| t.header == header)
    }

    pub fn error_message(&self, code: i64) -> Option<&str> {
        self.errors.get(&code).map(String::as_str)
    }
}

/// Address -> ABI lookup table supplied by the caller.
///
/// Operation codes are resolved against the destination's own entry only;
/// schemas sharing a header across different contracts are not disambiguated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContractRegistry(HashMap<String, ContractAbi>);

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl Into<String>, abi: ContractAbi) {
        self.0.insert(address.into(), abi);
    }

    pub fn get(&self, address: &str) -> Option<&ContractAbi> {
        self.0.get(address)
    }
}
