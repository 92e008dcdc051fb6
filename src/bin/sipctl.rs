//! SIP control-plane CLI binary.
//!
//! A command-line interface for managing SIP trunks, dispatch rules,
//! and participants.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use sipctl::cli::{
    Cli, Command, DispatchCommand, InboundCommand, OutboundCommand, ParticipantCommand,
    ParticipantCreateArgs, ParticipantTransferArgs,
};
use sipctl::output::{format_header_maps, format_headers, mask_auth, PrettyPrint};
use sipctl::{
    payload, Create, CreateSipParticipantRequest, Delete, DispatchRuleListQuery, List, Page,
    SipClient, SipDispatchRule, SipError, SipInboundTrunk, SipOutboundTrunk, SipParticipant,
    TransferSipParticipantRequest, TrunkListQuery, Update,
};
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match make_client(cli.url.as_deref(), cli.api_key.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: set SIPCTL_API_URL and SIPCTL_API_KEY, or pass --url and --api-key");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn make_client(url: Option<&str>, api_key: Option<&str>) -> sipctl::Result<SipClient> {
    let url = url.filter(|v| !v.is_empty()).ok_or_else(|| {
        SipError::ConfigMissing("control-plane URL not set".to_string())
    })?;
    let api_key = api_key.filter(|v| !v.is_empty()).ok_or_else(|| {
        SipError::ConfigMissing("API key not set".to_string())
    })?;
    SipClient::new(api_key, url)
}

async fn run(client: &SipClient, cli: Cli) -> sipctl::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Inbound(cmd) => run_inbound(client, cmd, json).await,
        Command::Outbound(cmd) => run_outbound(client, cmd, json).await,
        Command::Dispatch(cmd) => run_dispatch(client, cmd, json).await,
        Command::Participant(cmd) => run_participant(client, cmd, json).await,
    }
}

async fn run_inbound(client: &SipClient, cmd: InboundCommand, json: bool) -> sipctl::Result<()> {
    match cmd {
        InboundCommand::List(args) => {
            let query = TrunkListQuery {
                number: args.number,
            };
            let page = SipInboundTrunk::list_page(
                client,
                &query,
                args.page.unwrap_or(1),
                args.count.unwrap_or(20),
            )
            .await?;
            output_page(&page, json, |t| InboundTrunkRow::from(t))
        }
        InboundCommand::Create { requests } => {
            for arg in &requests {
                let params: SipInboundTrunk = payload::read_json_arg(arg)?;
                let trunk = SipInboundTrunk::create(client, params).await?;
                output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))?;
            }
            Ok(())
        }
        InboundCommand::Update(args) => {
            let req = args.resolve()?;
            let trunk = SipInboundTrunk::update(client, req.id, req.action).await?;
            output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))
        }
        InboundCommand::Delete { ids } => {
            for id in ids {
                let trunk = SipInboundTrunk::delete(client, id).await?;
                output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))?;
            }
            Ok(())
        }
    }
}

async fn run_outbound(client: &SipClient, cmd: OutboundCommand, json: bool) -> sipctl::Result<()> {
    match cmd {
        OutboundCommand::List(args) => {
            let query = TrunkListQuery {
                number: args.number,
            };
            let page = SipOutboundTrunk::list_page(
                client,
                &query,
                args.page.unwrap_or(1),
                args.count.unwrap_or(20),
            )
            .await?;
            output_page(&page, json, |t| OutboundTrunkRow::from(t))
        }
        OutboundCommand::Create { requests } => {
            for arg in &requests {
                let params: SipOutboundTrunk = payload::read_json_arg(arg)?;
                let trunk = SipOutboundTrunk::create(client, params).await?;
                output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))?;
            }
            Ok(())
        }
        OutboundCommand::Update(args) => {
            let req = args.resolve()?;
            let trunk = SipOutboundTrunk::update(client, req.id, req.action).await?;
            output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))
        }
        OutboundCommand::Delete { ids } => {
            for id in ids {
                let trunk = SipOutboundTrunk::delete(client, id).await?;
                output_mutated(&trunk, json, format!("SIPTrunkID: {}", trunk.sip_trunk_id))?;
            }
            Ok(())
        }
    }
}

async fn run_dispatch(client: &SipClient, cmd: DispatchCommand, json: bool) -> sipctl::Result<()> {
    match cmd {
        DispatchCommand::List(args) => {
            let query = DispatchRuleListQuery {
                trunk_id: args.trunk,
            };
            let page = SipDispatchRule::list_page(
                client,
                &query,
                args.page.unwrap_or(1),
                args.count.unwrap_or(20),
            )
            .await?;
            output_page(&page, json, |t| DispatchRuleRow::from(t))
        }
        DispatchCommand::Create { requests } => {
            for arg in &requests {
                let params: SipDispatchRule = payload::read_json_arg(arg)?;
                let rule = SipDispatchRule::create(client, params).await?;
                output_mutated(
                    &rule,
                    json,
                    format!("SIPDispatchRuleID: {}", rule.sip_dispatch_rule_id),
                )?;
            }
            Ok(())
        }
        DispatchCommand::Update(args) => {
            let req = args.resolve()?;
            let rule = SipDispatchRule::update(client, req.id, req.action).await?;
            output_mutated(
                &rule,
                json,
                format!("SIPDispatchRuleID: {}", rule.sip_dispatch_rule_id),
            )
        }
        DispatchCommand::Delete { ids } => {
            for id in ids {
                let rule = SipDispatchRule::delete(client, id).await?;
                output_mutated(
                    &rule,
                    json,
                    format!("SIPDispatchRuleID: {}", rule.sip_dispatch_rule_id),
                )?;
            }
            Ok(())
        }
    }
}

async fn run_participant(
    client: &SipClient,
    cmd: ParticipantCommand,
    json: bool,
) -> sipctl::Result<()> {
    match cmd {
        ParticipantCommand::Create(args) => create_participant(client, args, json).await,
        ParticipantCommand::Transfer(args) => transfer_participant(client, args).await,
    }
}

async fn create_participant(
    client: &SipClient,
    args: ParticipantCreateArgs,
    json: bool,
) -> sipctl::Result<()> {
    let mut req: CreateSipParticipantRequest = match &args.request {
        Some(arg) => payload::read_json_arg(arg)?,
        None => Default::default(),
    };

    if let Some(v) = args.trunk.filter(|v| !v.is_empty()) {
        req.sip_trunk_id = v;
    }
    if let Some(v) = args.number.filter(|v| !v.is_empty()) {
        req.sip_number = v;
    }
    if let Some(v) = args.call.filter(|v| !v.is_empty()) {
        req.sip_call_to = v;
    }
    if let Some(v) = args.room.filter(|v| !v.is_empty()) {
        req.room_name = v;
    }
    if args.wait {
        req.wait_until_answered = true;
    }
    req.validate()?;

    // Dialing blocks until the call is established, which takes longer than
    // an ordinary request allows.
    let deadline = req.dial_deadline(Some(Duration::from_secs(args.timeout)));

    match SipParticipant::create(client, &req, deadline).await {
        Ok(participant) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&participant)?);
            } else {
                println!("{}", participant.pretty_print());
            }
            Ok(())
        }
        Err(SipError::SipStatus { code, status }) => {
            println!("SIPStatusCode: {code}");
            println!("SIPStatus: {status}");
            Err(SipError::SipStatus { code, status })
        }
        Err(e) => Err(e),
    }
}

async fn transfer_participant(
    client: &SipClient,
    args: ParticipantTransferArgs,
) -> sipctl::Result<()> {
    let req = TransferSipParticipantRequest {
        room_name: args.room,
        participant_identity: args.identity,
        transfer_to: args.to,
        play_dialtone: args.play_dialtone,
    };

    SipParticipant::transfer(client, &req).await
}

/// Print the result of a create/update/delete: the canonical ID line, or the
/// full record with `--json`.
fn output_mutated<T: Serialize>(record: &T, json: bool, id_line: String) -> sipctl::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{id_line}");
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> sipctl::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if let Some(total) = page.total {
            let total_pages = (total + page.count as u64 - 1) / page.count.max(1) as u64;
            println!("\nPage {}/{} ({} total items)", page.page, total_pages, total);
        } else if page.has_more {
            println!("\nPage {} (more available)", page.page);
        } else {
            println!("\nPage {} (end)", page.page);
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct InboundTrunkRow {
    #[tabled(rename = "SipTrunkID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Numbers")]
    numbers: String,
    #[tabled(rename = "AllowedAddresses")]
    allowed_addresses: String,
    #[tabled(rename = "AllowedNumbers")]
    allowed_numbers: String,
    #[tabled(rename = "Authentication")]
    auth: String,
    #[tabled(rename = "Encryption")]
    encryption: String,
    #[tabled(rename = "Headers")]
    headers: String,
    #[tabled(rename = "Metadata")]
    metadata: String,
}

impl From<&SipInboundTrunk> for InboundTrunkRow {
    fn from(t: &SipInboundTrunk) -> Self {
        Self {
            id: t.sip_trunk_id.clone(),
            name: t.name.clone(),
            numbers: t.numbers.join(","),
            allowed_addresses: t.allowed_addresses.join(","),
            allowed_numbers: t.allowed_numbers.join(","),
            auth: mask_auth(&t.auth_username, !t.auth_password.is_empty()),
            encryption: t.media_encryption.short_name().to_string(),
            headers: format_header_maps(&[&t.headers, &t.headers_to_attributes]),
            metadata: t.metadata.clone(),
        }
    }
}

#[derive(Tabled)]
struct OutboundTrunkRow {
    #[tabled(rename = "SipTrunkID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Transport")]
    transport: String,
    #[tabled(rename = "Numbers")]
    numbers: String,
    #[tabled(rename = "Authentication")]
    auth: String,
    #[tabled(rename = "Encryption")]
    encryption: String,
    #[tabled(rename = "Headers")]
    headers: String,
    #[tabled(rename = "Metadata")]
    metadata: String,
}

impl From<&SipOutboundTrunk> for OutboundTrunkRow {
    fn from(t: &SipOutboundTrunk) -> Self {
        Self {
            id: t.sip_trunk_id.clone(),
            name: t.name.clone(),
            address: t.address.clone(),
            transport: t.transport.short_name().to_string(),
            numbers: t.numbers.join(","),
            auth: mask_auth(&t.auth_username, !t.auth_password.is_empty()),
            encryption: t.media_encryption.short_name().to_string(),
            headers: format_header_maps(&[&t.headers, &t.headers_to_attributes]),
            metadata: t.metadata.clone(),
        }
    }
}

#[derive(Tabled)]
struct DispatchRuleRow {
    #[tabled(rename = "SipDispatchRuleID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "SipTrunks")]
    trunks: String,
    #[tabled(rename = "Type")]
    rule_type: String,
    #[tabled(rename = "RoomName")]
    room: String,
    #[tabled(rename = "Pin")]
    pin: String,
    #[tabled(rename = "Attributes")]
    attributes: String,
    #[tabled(rename = "Agents")]
    agents: String,
}

impl From<&SipDispatchRule> for DispatchRuleRow {
    fn from(r: &SipDispatchRule) -> Self {
        let trunks = if r.trunk_ids.is_empty() {
            "<any>".to_string()
        } else {
            r.trunk_ids.join(",")
        };
        Self {
            id: r.sip_dispatch_rule_id.clone(),
            name: r.name.clone(),
            trunks,
            rule_type: r.rule_kind().to_string(),
            room: r.room_pattern(),
            pin: r.pin().to_string(),
            attributes: format_headers(&r.attributes),
            agents: r.agent_names().join(","),
        }
    }
}
