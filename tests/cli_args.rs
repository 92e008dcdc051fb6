//! CLI argument parsing tests.
//!
//! These tests pin the CLI surface: command tree, aliases, update flags,
//! and the resolution from parsed flags into mutation requests.

use clap::Parser;
use sipctl::cli::{
    Cli, Command, DispatchCommand, InboundCommand, OutboundCommand, ParticipantCommand,
};
use sipctl::{ListUpdate, UpdateAction};

#[test]
fn test_cli_parses_inbound_list() {
    let cli = Cli::parse_from(["sipctl", "inbound", "list"]);

    assert!(!cli.json);
    match cli.command {
        Command::Inbound(InboundCommand::List(args)) => {
            assert_eq!(args.page, None);
            assert_eq!(args.count, None);
        }
        _ => panic!("Expected inbound list command"),
    }
}

#[test]
fn test_cli_subcommand_aliases() {
    let cli = Cli::parse_from(["sipctl", "in", "list"]);
    assert!(matches!(cli.command, Command::Inbound(_)));

    let cli = Cli::parse_from(["sipctl", "out", "list"]);
    assert!(matches!(cli.command, Command::Outbound(_)));

    let cli = Cli::parse_from(["sipctl", "dispatch-rule", "list"]);
    assert!(matches!(cli.command, Command::Dispatch(_)));
}

#[test]
fn test_cli_parses_update_flags() {
    let cli = Cli::parse_from([
        "sipctl",
        "inbound",
        "update",
        "--id",
        "ST_123",
        "--name",
        "front-desk",
    ]);

    match cli.command {
        Command::Inbound(InboundCommand::Update(args)) => {
            assert_eq!(args.id.as_deref(), Some("ST_123"));
            assert_eq!(args.name.as_deref(), Some("front-desk"));
            assert_eq!(args.numbers, None);
            assert!(args.request.is_empty());
        }
        _ => panic!("Expected inbound update command"),
    }
}

#[test]
fn test_cli_parses_update_positional_json() {
    let cli = Cli::parse_from(["sipctl", "outbound", "update", r#"{"name": "dialer"}"#]);

    match cli.command {
        Command::Outbound(OutboundCommand::Update(args)) => {
            assert_eq!(args.request, vec![r#"{"name": "dialer"}"#]);
        }
        _ => panic!("Expected outbound update command"),
    }
}

#[test]
fn test_numbers_flag_splits_on_comma() {
    let cli = Cli::parse_from([
        "sipctl", "inbound", "update", "--id", "ST_1", "--numbers", "+1,+2",
    ]);

    match cli.command {
        Command::Inbound(InboundCommand::Update(args)) => {
            assert_eq!(args.numbers, Some(vec!["+1".to_string(), "+2".to_string()]));
        }
        _ => panic!("Expected inbound update command"),
    }
}

#[test]
fn test_numbers_flag_empty_is_clear_sentinel() {
    let cli = Cli::parse_from(["sipctl", "inbound", "update", "--id", "ST_1", "--numbers", ""]);

    match cli.command {
        Command::Inbound(InboundCommand::Update(args)) => {
            // A supplied-but-empty list flag parses to a single empty element,
            // which resolution turns into an explicit clear.
            assert_eq!(args.numbers, Some(vec![String::new()]));

            let req = args.resolve().unwrap();
            match req.action {
                UpdateAction::Update(patch) => {
                    assert_eq!(patch.numbers, Some(ListUpdate::clear()));
                }
                UpdateAction::Replace(_) => panic!("Expected patch mode"),
            }
        }
        _ => panic!("Expected inbound update command"),
    }
}

#[test]
fn test_update_resolution_from_flags() {
    let cli = Cli::parse_from([
        "sipctl",
        "inbound",
        "update",
        "--id",
        "ST_123",
        "--name",
        "front-desk",
    ]);

    let Command::Inbound(InboundCommand::Update(args)) = cli.command else {
        panic!("Expected inbound update command");
    };
    let req = args.resolve().unwrap();

    assert_eq!(req.id, "ST_123");
    match req.action {
        UpdateAction::Update(patch) => {
            assert_eq!(patch.name.as_deref(), Some("front-desk"));
            assert_eq!(patch.auth_username, None);
            assert_eq!(patch.auth_password, None);
            assert_eq!(patch.numbers, None);
        }
        UpdateAction::Replace(_) => panic!("Expected patch mode"),
    }
}

#[test]
fn test_update_resolution_from_json_literal() {
    let cli = Cli::parse_from([
        "sipctl",
        "inbound",
        "update",
        r#"{"sip_trunk_id": "ST_999", "name": "lobby"}"#,
    ]);

    let Command::Inbound(InboundCommand::Update(args)) = cli.command else {
        panic!("Expected inbound update command");
    };
    let req = args.resolve().unwrap();

    assert_eq!(req.id, "ST_999");
    match req.action {
        UpdateAction::Replace(trunk) => {
            assert!(trunk.sip_trunk_id.is_empty());
            assert_eq!(trunk.name, "lobby");
        }
        UpdateAction::Update(_) => panic!("Expected replace mode"),
    }
}

#[test]
fn test_outbound_update_transport_error_only_in_patch_mode() {
    // Patch mode: a bad transport fails resolution.
    let cli = Cli::parse_from([
        "sipctl", "outbound", "update", "--id", "ST_1", "--transport", "wss",
    ]);
    let Command::Outbound(OutboundCommand::Update(args)) = cli.command else {
        panic!("Expected outbound update command");
    };
    let err = args.resolve().unwrap_err();
    assert!(err.to_string().contains("unsupported transport"));

    // Replace mode: the flag is ignored, the JSON wins.
    let cli = Cli::parse_from([
        "sipctl",
        "outbound",
        "update",
        "--id",
        "ST_1",
        "--transport",
        "wss",
        r#"{"name": "dialer", "address": "sip.example.com"}"#,
    ]);
    let Command::Outbound(OutboundCommand::Update(args)) = cli.command else {
        panic!("Expected outbound update command");
    };
    assert!(args.resolve().is_ok());
}

#[test]
fn test_dispatch_update_trunks_flag() {
    let cli = Cli::parse_from([
        "sipctl", "dispatch", "update", "--id", "SDR_1", "--trunks", "ST_1,ST_2",
    ]);

    let Command::Dispatch(DispatchCommand::Update(args)) = cli.command else {
        panic!("Expected dispatch update command");
    };
    let req = args.resolve().unwrap();

    match req.action {
        UpdateAction::Update(patch) => {
            assert_eq!(patch.trunk_ids, Some(ListUpdate::set(["ST_1", "ST_2"])));
        }
        UpdateAction::Replace(_) => panic!("Expected patch mode"),
    }
}

#[test]
fn test_participant_create_flags() {
    let cli = Cli::parse_from([
        "sipctl",
        "participant",
        "create",
        "--trunk",
        "ST_3",
        "--call",
        "+15105550100",
        "--room",
        "ops",
        "--wait",
        "--timeout",
        "120",
    ]);

    match cli.command {
        Command::Participant(ParticipantCommand::Create(args)) => {
            assert_eq!(args.trunk.as_deref(), Some("ST_3"));
            assert_eq!(args.call.as_deref(), Some("+15105550100"));
            assert_eq!(args.room.as_deref(), Some("ops"));
            assert!(args.wait);
            assert_eq!(args.timeout, 120);
            assert_eq!(args.request, None);
        }
        _ => panic!("Expected participant create command"),
    }
}

#[test]
fn test_participant_transfer_requires_destination() {
    let result = Cli::try_parse_from([
        "sipctl",
        "participant",
        "transfer",
        "--room",
        "ops",
        "--identity",
        "caller-1",
    ]);
    assert!(result.is_err());

    let cli = Cli::parse_from([
        "sipctl",
        "participant",
        "transfer",
        "--room",
        "ops",
        "--identity",
        "caller-1",
        "--to",
        "tel:+15105550100",
        "--play-dialtone",
    ]);
    match cli.command {
        Command::Participant(ParticipantCommand::Transfer(args)) => {
            assert_eq!(args.to, "tel:+15105550100");
            assert!(args.play_dialtone);
        }
        _ => panic!("Expected participant transfer command"),
    }
}

#[test]
fn test_delete_requires_at_least_one_id() {
    let result = Cli::try_parse_from(["sipctl", "inbound", "delete"]);
    assert!(result.is_err());

    let cli = Cli::parse_from(["sipctl", "inbound", "delete", "ST_1", "ST_2"]);
    match cli.command {
        Command::Inbound(InboundCommand::Delete { ids }) => {
            assert_eq!(ids, vec!["ST_1", "ST_2"]);
        }
        _ => panic!("Expected inbound delete command"),
    }
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["sipctl", "--json", "inbound", "list"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["sipctl", "inbound", "list", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_list_pagination_args() {
    let cli = Cli::parse_from(["sipctl", "outbound", "list", "--page", "2", "--count", "50"]);

    match cli.command {
        Command::Outbound(OutboundCommand::List(args)) => {
            assert_eq!(args.page, Some(2));
            assert_eq!(args.count, Some(50));
        }
        _ => panic!("Expected outbound list command"),
    }
}
