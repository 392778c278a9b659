// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use healthcare_records::{
    blockchain::RpcWallet,
    command::{parse_command, Command, HELP},
    config::{ClientConfig, ConfigOverrides, LogFormat, LOG_FORMAT_ENV},
    dashboard::{Dashboard, TerminalNotifier},
    render::{render_json, render_text},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "healthcare")]
#[command(about = "Wallet-connected client for the healthcare records contract")]
struct Cli {
    /// Network preset (localhost, sepolia, mainnet)
    #[arg(long)]
    network: Option<String>,
    /// JSON-RPC endpoint, overrides the preset URL
    #[arg(long)]
    rpc_url: Option<String>,
    /// Records contract address
    #[arg(long)]
    contract: Option<String>,
    /// Known owner address; skips the getOwner call
    #[arg(long)]
    owner: Option<String>,
    /// PEM private key file for local signing
    #[arg(long)]
    key_file: Option<PathBuf>,
    /// Start without a wallet provider
    #[arg(long)]
    no_wallet: bool,
    /// Connect to the wallet immediately
    #[arg(long)]
    connect: bool,
}

type Session = Dashboard<RpcWallet, TerminalNotifier>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_format = LogFormat::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())?;
    init_tracing(log_format);

    let config = ClientConfig::load(ConfigOverrides {
        network: cli.network,
        rpc_url: cli.rpc_url,
        contract_address: cli.contract,
        owner_address: cli.owner,
        key_file: cli.key_file,
        no_wallet: cli.no_wallet,
    })?;
    let wallet = config.build_wallet()?;

    tracing::info!(
        network = config.network.name,
        rpc_url = %config.rpc_url,
        contract = %config.contract_address,
        wallet = wallet.is_some(),
        "Healthcare records client starting"
    );

    if let Some(wallet) = &wallet {
        match wallet.chain_id().await {
            Ok(chain_id) if chain_id != config.network.chain_id => tracing::warn!(
                expected = config.network.chain_id,
                actual = chain_id,
                "Node chain ID does not match the selected network"
            ),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Could not reach the wallet node"),
        }
    }

    let mut session: Session = Dashboard::new(
        wallet,
        TerminalNotifier,
        config.contract_address,
        config.owner_override,
    );

    if cli.connect {
        session.connect().await;
    }
    print!("{}", render_text(&session.view()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&mut session, command).await?,
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

/// Apply one command to the session and re-render where the view changed.
async fn dispatch(session: &mut Session, command: Command) -> Result<(), serde_json::Error> {
    let rerender = match command {
        Command::Connect => {
            session.connect().await;
            true
        }
        Command::SetPatientId(v) => {
            session.form_mut().patient_id = v;
            false
        }
        Command::SetPatientName(v) => {
            session.form_mut().patient_name = v;
            false
        }
        Command::SetDiagnosis(v) => {
            session.form_mut().diagnosis = v;
            false
        }
        Command::SetTreatment(v) => {
            session.form_mut().treatment = v;
            false
        }
        Command::SetProvider(v) => {
            session.form_mut().provider_address = v;
            false
        }
        Command::Fetch => {
            session.fetch_patient_records().await;
            true
        }
        Command::Add => {
            session.add_record().await;
            false
        }
        Command::Authorize => {
            session.authorize_provider().await;
            false
        }
        Command::Balance => {
            session.refresh_balance().await;
            true
        }
        Command::Show { json: true } => {
            println!("{}", render_json(&session.view())?);
            false
        }
        Command::Show { json: false } => true,
        Command::Help => {
            println!("{HELP}");
            false
        }
        Command::Quit | Command::Empty => false,
    };

    if rerender {
        print!("{}", render_text(&session.view()));
    }
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("healthcare_records=info,healthcare=info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so they never interleave with the rendered view.
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
