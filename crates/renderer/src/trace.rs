//! In-memory model of a sandbox execution trace.
//!
//! Produced by the execution engine (or loaded from its JSON dump) and
//! treated as read-only input for a single render call.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// One message passed between contracts during the simulated execution.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub source: String,
    pub destination: String,
    /// Attached value in nanotons. External messages carry no value and are
    /// skipped by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u128>,
    #[serde(default)]
    pub bounced: bool,
    pub body: Cell,
}

/// Outcome of a transaction's compute phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ComputePhase {
    #[default]
    Ok,
    Skipped,
    Vm {
        exit_code: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_message: Option<Message>,
    #[serde(default)]
    pub out_messages: Vec<Message>,
    #[serde(default)]
    pub compute: ComputePhase,
}

/// Ordered record of simulated execution steps; the order defines the
/// diagram's edge order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Trace {
    pub transactions: Vec<Transaction>,
}
