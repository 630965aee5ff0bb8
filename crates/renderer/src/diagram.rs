//! Trace-to-Mermaid transformation: edge building, participant
//! deduplication and final text assembly.

use crate::abi::ContractRegistry;
use crate::consts::COINS_DECIMALS;
use crate::decode::{parse_body, resolve_opcode};
use crate::trace::{ComputePhase, Trace, Transaction};
use std::collections::HashMap;

/// Address -> friendly display name, supplied by the caller. Addresses
/// without an entry fall back to their raw string form.
pub type DisplayNames = HashMap<String, String>;

/// Rendering switches; see the config crate for the env-driven variants.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Abbreviate addresses in node ids and participant labels.
    pub short_addresses: bool,
    /// Unit label appended to formatted message values.
    pub unit: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            short_addresses: true,
            unit: "TON".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &config::RenderConfig) -> Self {
        Self {
            short_addresses: config.short_addresses,
            unit: config.unit.clone(),
        }
    }
}

/// Abbreviate a friendly-form address for display.
///
/// Strings shorter than 10 characters, or without a recognised `EQ`/`UQ`
/// prefix, pass through unchanged. Otherwise the result is the four
/// characters after the prefix, `..`, and the four characters ending three
/// from the end, regardless of total length.
pub fn shorten_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() < 10 || !(addr.starts_with("EQ") || addr.starts_with("UQ")) {
        return addr.to_string();
    }
    let head: String = chars[2..6].iter().collect();
    let tail: String = chars[chars.len() - 7..chars.len() - 3].iter().collect();
    format!("{head}..{tail}")
}

/// Format a nanoton amount as a decimal value with trailing zeros stripped:
/// `1_500_000_000` -> "1.5", `1_000_000_000` -> "1", `0` -> "0".
pub fn format_coins(value: u128) -> String {
    let digits = value.to_string();
    let (int_part, frac_part) = if digits.len() > COINS_DECIMALS {
        let split = digits.len() - COINS_DECIMALS;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        (
            "0".to_string(),
            format!("{digits:0>width$}", width = COINS_DECIMALS),
        )
    };
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Render a trace as a Mermaid sequence diagram.
///
/// Participants appear in order of first appearance, deduplicated; edges
/// follow trace order and, within a transaction, outbound message order.
/// Messages without a value are skipped. All lookups go through the maps
/// passed in here; nothing is read from ambient state.
pub fn render_mermaid(
    trace: &Trace,
    names: &DisplayNames,
    registry: &ContractRegistry,
    options: &RenderOptions,
) -> String {
    let mut participants: Vec<String> = Vec::new();
    let mut edges: Vec<String> = Vec::new();

    for transaction in &trace.transactions {
        if let Some(note) = failure_note(transaction, names, registry, options) {
            edges.push(note);
        }

        for message in &transaction.out_messages {
            let Some(value) = message.value else {
                tracing::debug!(
                    source = %message.source,
                    destination = %message.destination,
                    "Skipping message without value"
                );
                continue;
            };

            let (src_node, src_alias) = node_and_alias(&message.source, names, options);
            let (dst_node, dst_alias) = node_and_alias(&message.destination, names, options);
            add_participant(&mut participants, src_alias);
            add_participant(&mut participants, dst_alias);

            let abi = registry.get(&message.destination);
            let (op_label, schema) = resolve_opcode(&message.body, abi);
            let bounced = if message.bounced { "\u{274c}" } else { "" };
            let payload = parse_body(&message.body, schema);

            edges.push(format!(
                "{src_node} ->> {dst_node}: [{op_label}{bounced}]<br/>{amount} {unit}<br/>{payload}",
                amount = format_coins(value),
                unit = options.unit,
            ));
        }
    }

    assemble(&participants, &edges)
}

/// Node id and participant declaration for one address.
///
/// With a friendly name the declaration binds the (shortened) name to
/// "name<br/>compact address"; otherwise it is just the node id itself.
fn node_and_alias(
    address: &str,
    names: &DisplayNames,
    options: &RenderOptions,
) -> (String, String) {
    let display = names
        .get(address)
        .cloned()
        .unwrap_or_else(|| address.to_string());
    let node = if options.short_addresses {
        shorten_address(&display)
    } else {
        display.clone()
    };
    let alias = if display == address {
        node.clone()
    } else {
        let compact = if options.short_addresses {
            shorten_address(address)
        } else {
            address.to_string()
        };
        format!("{node} as {display}<br/>{compact}")
    };
    (node, alias)
}

fn add_participant(participants: &mut Vec<String>, alias: String) {
    if !participants.contains(&alias) {
        participants.push(alias);
    }
}

/// Compute-phase failure annotation: one note per failing transaction,
/// anchored to the source of its first valued outbound message and emitted
/// before that transaction's message edges.
fn failure_note(
    transaction: &Transaction,
    names: &DisplayNames,
    registry: &ContractRegistry,
    options: &RenderOptions,
) -> Option<String> {
    let ComputePhase::Vm { exit_code } = transaction.compute else {
        return None;
    };
    if exit_code == 0 {
        return None;
    }
    let message = transaction.out_messages.first()?;
    message.value?;

    let (src_node, _) = node_and_alias(&message.source, names, options);
    let label = registry
        .get(&message.source)
        .and_then(|abi| abi.error_message(exit_code as i64))
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::debug!(
                exit_code,
                address = %message.source,
                "No error mapping for exit code"
            );
            format!("unknown error {exit_code}")
        });

    Some(format!("Note over {src_node}: ERR: {label}"))
}

fn assemble(participants: &[String], edges: &[String]) -> String {
    let mut out = String::from("sequenceDiagram\n  autonumber\n");
    for participant in participants {
        out.push_str("  participant ");
        out.push_str(participant);
        out.push('\n');
    }
    for edge in edges {
        out.push_str("  ");
        out.push_str(edge);
        out.push('\n');
    }
    out
}
