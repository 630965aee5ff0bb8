use integration_tests::fixtures::{message, opaque_body, transaction, transfer_abi};
use ton_trace_mermaid::{
    ComputePhase, ContractRegistry, DisplayNames, RenderOptions, Trace, Transaction,
    render_mermaid,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// One transaction, two valued messages, no registry: two participants, the
/// amounts "2.5" and "0", and opaque calldata placeholders.
#[test]
fn test_two_message_trace_without_registry() {
    init_tracing();

    let trace = Trace {
        transactions: vec![transaction(
            "B",
            vec![
                message("B", "A", Some(2_500_000_000), opaque_body(0xdeadbeef)),
                message("A", "B", Some(0), opaque_body(0xdeadbeef)),
            ],
        )],
    };
    let mut names = DisplayNames::new();
    names.insert("A".to_string(), "Vault".to_string());

    let diagram = render_mermaid(
        &trace,
        &names,
        &ContractRegistry::new(),
        &RenderOptions::default(),
    );

    assert_eq!(diagram.matches("participant ").count(), 2);
    assert!(diagram.contains("participant B\n"));
    assert!(diagram.contains("participant Vault as Vault<br/>A\n"));

    let edges: Vec<&str> = diagram.lines().filter(|l| l.contains("->>")).collect();
    assert_eq!(edges.len(), 2);
    assert!(edges[0].contains("B ->> Vault:"));
    assert!(edges[0].contains("2.5 TON"));
    assert!(edges[0].contains("Calldata"));
    assert!(edges[1].contains("Vault ->> B:"));
    assert!(edges[1].contains("0 TON"));
    assert!(edges[1].contains("Calldata"));
}

/// Compute-phase failure with a mapped exit code: the annotation edge comes
/// before the message edge of the same transaction.
#[test]
fn test_failure_annotation_ordering() {
    init_tracing();

    let mut registry = ContractRegistry::new();
    registry.insert("Wallet", transfer_abi());

    let trace = Trace {
        transactions: vec![Transaction {
            compute: ComputePhase::Vm { exit_code: 709 },
            ..transaction(
                "Wallet",
                vec![message(
                    "Wallet",
                    "Pool",
                    Some(1_000_000_000),
                    opaque_body(0xdeadbeef),
                )],
            )
        }],
    };

    let diagram = render_mermaid(
        &trace,
        &DisplayNames::new(),
        &registry,
        &RenderOptions::default(),
    );

    let note = diagram
        .find("Note over Wallet: ERR: insufficient funds")
        .expect("annotation edge missing");
    let edge = diagram.find("Wallet ->> Pool:").expect("message edge missing");
    assert!(note < edge);
}

/// Edge count equals the number of valued outbound messages, in trace order.
#[test]
fn test_edge_count_matches_valued_messages() {
    init_tracing();

    let trace = Trace {
        transactions: vec![
            transaction(
                "A",
                vec![
                    message("A", "B", Some(1), opaque_body(1)),
                    message("A", "C", None, opaque_body(2)),
                ],
            ),
            transaction(
                "B",
                vec![
                    message("B", "C", Some(2), opaque_body(3)),
                    message("B", "A", Some(3), opaque_body(4)),
                ],
            ),
        ],
    };

    let diagram = render_mermaid(
        &trace,
        &DisplayNames::new(),
        &ContractRegistry::new(),
        &RenderOptions::default(),
    );

    let edges: Vec<&str> = diagram.lines().filter(|l| l.contains("->>")).collect();
    assert_eq!(edges.len(), 3);
    assert!(edges[0].contains("A ->> B:"));
    assert!(edges[1].contains("B ->> C:"));
    assert!(edges[2].contains("B ->> A:"));
}

/// Repeated addresses never duplicate participants; order of first
/// appearance is preserved.
#[test]
fn test_participant_dedup_across_transactions() {
    init_tracing();

    let trace = Trace {
        transactions: vec![
            transaction("A", vec![message("A", "B", Some(1), opaque_body(1))]),
            transaction("B", vec![message("B", "A", Some(1), opaque_body(1))]),
            transaction("A", vec![message("A", "B", Some(1), opaque_body(1))]),
        ],
    };

    let diagram = render_mermaid(
        &trace,
        &DisplayNames::new(),
        &ContractRegistry::new(),
        &RenderOptions::default(),
    );

    let participants: Vec<&str> = diagram
        .lines()
        .filter(|l| l.trim_start().starts_with("participant "))
        .collect();
    assert_eq!(participants, ["  participant A", "  participant B"]);
}
