use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use ton_trace_mermaid::{
    Cell, CellBuilder, ComputePhase, ContractAbi, Message, Trace, Transaction,
};

/// Loads JSON fixture files relative to the crate's `fixtures/` directory.
pub struct FixtureLoader {
    fixtures_dir: PathBuf,
}

impl FixtureLoader {
    /// Create a loader rooted at this crate's `fixtures/` directory.
    pub fn new() -> Self {
        Self {
            fixtures_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"),
        }
    }

    /// Load a JSON fixture file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Value> {
        let full_path = self.fixtures_dir.join(path.as_ref());

        let content = std::fs::read_to_string(&full_path)
            .context(format!("Failed to read fixture file: {:?}", full_path))?;

        let json: Value = serde_json::from_str(&content)
            .context(format!("Failed to parse JSON fixture: {:?}", full_path))?;

        Ok(json)
    }

    /// Load and deserialize a trace fixture
    pub fn load_trace(&self, path: impl AsRef<Path>) -> Result<Trace> {
        let json = self.load(path)?;
        serde_json::from_value(json).context("Failed to deserialize trace fixture")
    }
}

impl Default for FixtureLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Jetton-style transfer ABI with one typed message and one error code.
pub fn transfer_abi() -> ContractAbi {
    serde_json::from_value(json!({
        "types": [
            {
                "header": 0x0f8a7ea5u32,
                "name": "transfer",
                "fields": [
                    { "name": "query_id", "type": "uint", "format": 64 },
                    { "name": "amount", "type": "uint", "format": "coins" },
                    { "name": "destination", "type": "address" },
                    { "name": "forward_payload", "type": "slice", "format": "remainder" }
                ]
            }
        ],
        "errors": { "709": "insufficient funds" }
    }))
    .expect("static ABI fixture must deserialize")
}

/// Body matching [`transfer_abi`]'s `transfer` layout.
pub fn transfer_body(query_id: u64, amount: u128) -> Cell {
    CellBuilder::new()
        .store_uint(0x0f8a7ea5, 32)
        .expect("opcode fits")
        .store_uint(query_id as u128, 64)
        .expect("query_id fits")
        .store_coins(amount)
        .expect("amount fits")
        .store_address(0, &[0xab; 32])
        .expect("address fits")
        .build()
}

/// Minimal body carrying only an operation code.
pub fn opaque_body(opcode: u32) -> Cell {
    CellBuilder::new()
        .store_uint(opcode as u128, 32)
        .expect("opcode fits")
        .build()
}

pub fn message(source: &str, destination: &str, value: Option<u128>, body: Cell) -> Message {
    Message {
        source: source.to_string(),
        destination: destination.to_string(),
        value,
        bounced: false,
        body,
    }
}

pub fn transaction(address: &str, out_messages: Vec<Message>) -> Transaction {
    Transaction {
        address: address.to_string(),
        in_message: None,
        out_messages,
        compute: ComputePhase::Ok,
    }
}
