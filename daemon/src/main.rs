//! Tip jar daemon: serves the tip jar page and manages signing keys.

mod config;
mod keystore_cmd;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use tipjar_controller::TipJarController;
use tipjar_ledger::HorizonClient;
use tipjar_types::{Network, TIP_JAR_ADDRESS};
use tipjar_utils::{init_logging, LogFormat};
use tipjar_wallet_core::{KeystoreWallet, WalletProvider};
use tipjar_web::WebServer;

use crate::config::{Overrides, TipJarConfig};

#[derive(Parser)]
#[command(name = "tipjar", about = "Stellar testnet tip jar", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, global = true, env = "TIPJAR_CONFIG")]
    config: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "TIPJAR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "TIPJAR_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the web UI.
    Serve {
        /// Interface to bind.
        #[arg(long, env = "TIPJAR_LISTEN_ADDR")]
        listen_addr: Option<IpAddr>,

        /// Port to bind.
        #[arg(long, env = "TIPJAR_PORT")]
        port: Option<u16>,

        /// Keystore holding the signing key.
        #[arg(long, env = "TIPJAR_KEYSTORE")]
        keystore: Option<PathBuf>,

        /// Keystore password.
        #[arg(long, env = "TIPJAR_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Manage encrypted keystore files.
    Keystore {
        #[command(subcommand)]
        action: KeystoreAction,
    },
}

#[derive(clap::Subcommand)]
enum KeystoreAction {
    /// Generate a new key and write it to a keystore.
    New {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, env = "TIPJAR_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Seal an existing `S...` secret seed into a keystore.
    Import {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, env = "TIPJAR_SECRET_SEED", hide_env_values = true)]
        seed: String,
        #[arg(long, env = "TIPJAR_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        force: bool,
    },

    /// Unlock a keystore and print its address.
    Show {
        path: PathBuf,
        #[arg(long, env = "TIPJAR_KEYSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => TipJarConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TipJarConfig::default(),
    };

    let mut overrides = Overrides {
        log_format: cli.log_format,
        log_level: cli.log_level,
        ..Overrides::default()
    };
    let mut password = None;
    if let Command::Serve {
        listen_addr,
        port,
        keystore,
        password: pw,
    } = &cli.command
    {
        overrides.listen_addr = *listen_addr;
        overrides.port = *port;
        overrides.keystore_path = keystore.clone();
        password = pw.clone();
    }
    let config = file_config.with_overrides(overrides);

    init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Serve { .. } => serve(config, password).await,
        Command::Keystore { action } => run_keystore(action),
    }
}

async fn serve(config: TipJarConfig, password: Option<String>) -> anyhow::Result<()> {
    let network = Network::TESTNET;
    let wallet = open_wallet(&config, password.as_deref(), network)?;
    match wallet.address() {
        Some(address) => info!(%address, "signing key loaded"),
        None => warn!(
            "no signing key configured; set --keystore or {}",
            config.secret_seed_env
        ),
    }

    if wallet.address().is_some() && !config.listen_addr.is_loopback() {
        warn!(
            listen_addr = %config.listen_addr,
            "signing key is reachable beyond this machine; any client that can reach the port can send tips"
        );
    }

    let ledger = HorizonClient::testnet()?;
    info!(
        horizon = ledger.base_url(),
        destination = TIP_JAR_ADDRESS,
        network = network.as_str(),
        "starting tip jar"
    );

    let controller = Arc::new(TipJarController::new(wallet, ledger));
    WebServer::new(config.socket_addr(), controller)
        .run(shutdown_signal())
        .await?;
    Ok(())
}

/// Keystore first, then the secret seed environment variable, otherwise a
/// wallet with no key.
fn open_wallet(
    config: &TipJarConfig,
    password: Option<&str>,
    network: Network,
) -> anyhow::Result<KeystoreWallet> {
    if let Some(path) = &config.keystore_path {
        let password = password
            .context("a keystore is configured but no password was given (TIPJAR_KEYSTORE_PASSWORD)")?;
        return KeystoreWallet::from_keystore_file(path, password, network)
            .with_context(|| format!("opening keystore {}", path.display()));
    }
    match std::env::var(&config.secret_seed_env) {
        Ok(seed) if !seed.trim().is_empty() => KeystoreWallet::from_secret_seed(seed.trim(), network)
            .with_context(|| format!("invalid secret seed in {}", config.secret_seed_env)),
        _ => Ok(KeystoreWallet::empty(network).with_unavailable_message(format!(
            "No signing key loaded. Start the tip jar with --keystore or set {}.",
            config.secret_seed_env
        ))),
    }
}

fn run_keystore(action: KeystoreAction) -> anyhow::Result<()> {
    let address = match action {
        KeystoreAction::New {
            out,
            password,
            force,
        } => keystore_cmd::create(&out, &password, force)?,
        KeystoreAction::Import {
            out,
            seed,
            password,
            force,
        } => keystore_cmd::import(&out, &seed, &password, force)?,
        KeystoreAction::Show { path, password } => keystore_cmd::show(&path, &password)?,
    };
    println!("{address}");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
