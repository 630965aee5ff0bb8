//! Schema-driven payload decoding and operation code resolution.

use crate::abi::{ContractAbi, FieldFormat, FieldKind, FieldSchema, FieldTypeTag, TypeSchema};
use crate::cell::Cell;
use crate::consts::{OPCODE_BITS, RAW_CALLDATA};
use crate::slice::{CellSlice, CursorError};
use serde_json::{Map, Value};

/// Resolve the leading 32-bit operation code of `body` against the
/// destination contract's ABI.
///
/// The code is read from a disposable slice so the body can be decoded again
/// afterwards. Returns the display label and, on a header match, the schema
/// to decode fields with. Bodies shorter than the opcode width resolve to
/// `"n/a"` with no schema.
pub fn resolve_opcode<'a>(
    body: &Cell,
    abi: Option<&'a ContractAbi>,
) -> (String, Option<&'a TypeSchema>) {
    let mut probe = CellSlice::new(body);
    let opcode = match probe.load_uint(OPCODE_BITS) {
        Ok(code) => code as u32,
        Err(_) => return ("n/a".to_string(), None),
    };
    match abi.and_then(|a| a.type_by_header(opcode)) {
        Some(schema) => (format!("{}({:08x})", schema.name, opcode), Some(schema)),
        None => (format!("{opcode:08x}"), None),
    }
}

/// Decode `fields` in schema order from `slice` into an ordered name -> value
/// record.
///
/// Optional fields consume one presence bit first; absent fields record
/// `null` without consuming anything further. Unrecognised type/format
/// combinations record a visible placeholder instead of failing, so schema
/// versions this crate does not know about still produce output. Only a
/// genuine read past the end of the body aborts, and then only this record.
pub fn decode_fields(
    slice: &mut CellSlice<'_>,
    fields: &[FieldSchema],
) -> Result<Map<String, Value>, CursorError> {
    let mut record = Map::new();
    for field in fields {
        if field.kind != FieldKind::Simple {
            continue;
        }
        if field.optional && !slice.load_bit()? {
            record.insert(field.name.clone(), Value::Null);
            continue;
        }
        let value = match (&field.type_tag, &field.format) {
            (FieldTypeTag::Uint, Some(FieldFormat::Tag(tag))) if tag == "coins" => {
                Value::String(slice.load_coins()?.to_string())
            }
            (FieldTypeTag::Uint, Some(FieldFormat::Bits(bits))) => {
                Value::String(slice.load_uint(*bits)?.to_string())
            }
            (FieldTypeTag::Int, Some(FieldFormat::Bits(bits))) => {
                Value::String(slice.load_int(*bits)?.to_string())
            }
            (FieldTypeTag::Address, _) => Value::String(slice.load_address()?),
            (FieldTypeTag::Bool, _) => Value::Bool(slice.load_bit()?),
            (FieldTypeTag::Cell, _) => Value::String(hex::encode(slice.load_ref()?.encode())),
            (FieldTypeTag::Slice, Some(FieldFormat::Tag(tag))) if tag == "remainder" => {
                // Terminal field; reports what is left without consuming it
                Value::String(format!(
                    "remainder {} bits {} refs",
                    slice.remaining_bits(),
                    slice.remaining_refs()
                ))
            }
            (_, format) => {
                let format = format
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "none".to_string());
                Value::String(format!("UNKNOWN TYPE {format}"))
            }
        };
        record.insert(field.name.clone(), value);
    }
    Ok(record)
}

/// Render a message body for display: the decoded field record as compact
/// JSON, or the opaque calldata placeholder when no schema applies.
///
/// A malformed body degrades to the placeholder for this message only; the
/// rest of the diagram is unaffected.
pub fn parse_body(body: &Cell, schema: Option<&TypeSchema>) -> String {
    let Some(schema) = schema else {
        return RAW_CALLDATA.to_string();
    };
    if schema.fields.is_empty() {
        return RAW_CALLDATA.to_string();
    }

    let mut slice = CellSlice::new(body);
    let decoded = slice
        .skip(OPCODE_BITS as usize)
        .and_then(|_| decode_fields(&mut slice, &schema.fields));

    match decoded {
        Ok(record) => match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(
                    schema = %schema.name,
                    error = %error,
                    "Failed to serialize decoded fields"
                );
                RAW_CALLDATA.to_string()
            }
        },
        Err(error) => {
            tracing::warn!(
                schema = %schema.name,
                error = %error,
                "Failed to decode message body, falling back to opaque calldata"
            );
            RAW_CALLDATA.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellBuilder;
    use serde_json::json;

    fn transfer_schema() -> TypeSchema {
        serde_json::from_value(json!({
            "header": 0x0f8a7ea5u32,
            "name": "transfer",
            "fields": [
                { "name": "query_id", "type": "uint", "format": 64 },
                { "name": "amount", "type": "uint", "format": "coins" },
                { "name": "destination", "type": "address" },
                { "name": "forward_payload", "type": "slice", "format": "remainder" }
            ]
        }))
        .unwrap()
    }

    fn transfer_body() -> Cell {
        CellBuilder::new()
            .store_uint(0x0f8a7ea5, 32)
            .unwrap()
            .store_uint(777, 64)
            .unwrap()
            .store_coins(1_000_000_000)
            .unwrap()
            .store_address(0, &[0xab; 32])
            .unwrap()
            .build()
    }

    #[test]
    fn test_resolve_opcode_with_schema() {
        let mut abi = ContractAbi::default();
        abi.types.push(transfer_schema());

        let (label, schema) = resolve_opcode(&transfer_body(), Some(&abi));
        assert_eq!(label, "transfer(0f8a7ea5)");
        assert_eq!(schema.unwrap().name, "transfer");
    }

    #[test]
    fn test_resolve_opcode_without_schema() {
        let (label, schema) = resolve_opcode(&transfer_body(), None);
        assert_eq!(label, "0f8a7ea5");
        assert!(schema.is_none());
    }

    #[test]
    fn test_resolve_opcode_short_body() {
        let body = CellBuilder::new().store_uint(3, 8).unwrap().build();
        let (label, schema) = resolve_opcode(&body, None);
        assert_eq!(label, "n/a");
        assert!(schema.is_none());
    }

    #[test]
    fn test_resolve_opcode_does_not_consume_body() {
        let body = transfer_body();
        let before = body.clone();
        let _ = resolve_opcode(&body, None);
        // The probe slice is disposable; the cell itself is untouched
        assert_eq!(body, before);
    }

    #[test]
    fn test_decode_fields_schema_order() {
        let schema = transfer_schema();
        let body = transfer_body();
        let mut slice = CellSlice::new(&body);
        slice.skip(32).unwrap();

        let record = decode_fields(&mut slice, &schema.fields).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["query_id", "amount", "destination", "forward_payload"]
        );
        assert_eq!(record["query_id"], json!("777"));
        assert_eq!(record["amount"], json!("1000000000"));
        assert_eq!(record["destination"], json!(format!("0:{}", "ab".repeat(32))));
        assert_eq!(record["forward_payload"], json!("remainder 0 bits 0 refs"));
    }

    #[test]
    fn test_decode_optional_absent_records_null() {
        let fields: Vec<FieldSchema> = serde_json::from_value(json!([
            { "name": "memo", "type": "uint", "format": 32, "optional": true },
            { "name": "flag", "type": "bool" }
        ]))
        .unwrap();

        // Presence bit 0, then the bool field
        let body = CellBuilder::new()
            .store_bit(false)
            .unwrap()
            .store_bit(true)
            .unwrap()
            .build();
        let mut slice = CellSlice::new(&body);

        let record = decode_fields(&mut slice, &fields).unwrap();
        assert_eq!(record["memo"], Value::Null);
        assert_eq!(record["flag"], json!(true));
    }

    #[test]
    fn test_decode_optional_present() {
        let fields: Vec<FieldSchema> = serde_json::from_value(json!([
            { "name": "memo", "type": "uint", "format": 32, "optional": true }
        ]))
        .unwrap();

        let body = CellBuilder::new()
            .store_bit(true)
            .unwrap()
            .store_uint(99, 32)
            .unwrap()
            .build();
        let mut slice = CellSlice::new(&body);

        let record = decode_fields(&mut slice, &fields).unwrap();
        assert_eq!(record["memo"], json!("99"));
    }

    #[test]
    fn test_decode_unknown_type_is_placeholder() {
        let fields: Vec<FieldSchema> = serde_json::from_value(json!([
            { "name": "x", "type": "varuint16", "format": 16 },
            { "name": "y", "type": "uint", "format": 8 }
        ]))
        .unwrap();

        let body = CellBuilder::new().store_uint(5, 8).unwrap().build();
        let mut slice = CellSlice::new(&body);

        let record = decode_fields(&mut slice, &fields).unwrap();
        assert_eq!(record["x"], json!("UNKNOWN TYPE 16"));
        // The unknown field consumed nothing; y still decodes
        assert_eq!(record["y"], json!("5"));
    }

    #[test]
    fn test_decode_cell_field_as_hex() {
        let fields: Vec<FieldSchema> =
            serde_json::from_value(json!([{ "name": "payload", "type": "cell" }])).unwrap();

        let child = CellBuilder::new().store_uint(0xbeef, 16).unwrap().build();
        let body = CellBuilder::new().store_ref(child).unwrap().build();
        let mut slice = CellSlice::new(&body);

        let record = decode_fields(&mut slice, &fields).unwrap();
        assert_eq!(record["payload"], json!("beef"));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let schema = transfer_schema();
        let body = transfer_body();

        let mut first = CellSlice::new(&body);
        first.skip(32).unwrap();
        let a = decode_fields(&mut first, &schema.fields).unwrap();

        let mut second = CellSlice::new(&body);
        second.skip(32).unwrap();
        let b = decode_fields(&mut second, &schema.fields).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_body_no_schema_is_calldata() {
        assert_eq!(parse_body(&transfer_body(), None), RAW_CALLDATA);
    }

    #[test]
    fn test_parse_body_empty_fields_is_calldata() {
        let schema: TypeSchema =
            serde_json::from_value(json!({ "header": 1u32, "name": "ping", "fields": [] }))
                .unwrap();
        assert_eq!(parse_body(&transfer_body(), Some(&schema)), RAW_CALLDATA);
    }

    #[test]
    fn test_parse_body_decodes_record() {
        let schema = transfer_schema();
        let rendered = parse_body(&transfer_body(), Some(&schema));
        assert!(rendered.starts_with('{'));
        assert!(rendered.contains("\"query_id\":\"777\""));
        assert!(rendered.contains("\"amount\":\"1000000000\""));
    }

    #[test]
    fn test_parse_body_degrades_on_underrun() {
        let schema = transfer_schema();
        // Opcode only; the schema expects 64 more bits at least
        let body = CellBuilder::new()
            .store_uint(0x0f8a7ea5, 32)
            .unwrap()
            .build();
        assert_eq!(parse_body(&body, Some(&schema)), RAW_CALLDATA);
    }
}
