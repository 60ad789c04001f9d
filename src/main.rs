//! `pause-sdk` command line.
//!
//! ```text
//! pause-sdk [--config FILE] [--log-level LEVEL] <command>
//!
//!   pause        pause a contract (EVM: pause(), NEAR: delegate_pause)
//!   unpause      unpause an EVM contract (unPause())
//!   is-pausable  probe whether a contract exposes a pause mechanism
//!   signer       print the derived signing identity for a chain
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use pause_sdk::blockchain::{ChainIdArg, NetworkId};
use pause_sdk::config::{default_config, load_config};
use pause_sdk::observability::logging::init_logging;
use pause_sdk::{
    EvmPauseRequest, NearPauseRequest, PausableQuery, PauseConfig, PauseRequest, PauseSdk, PauseSdkError,
    UnpauseRequest,
};

#[derive(Parser)]
#[command(name = "pause-sdk")]
#[command(about = "Pause contracts on EVM and NEAR chains", long_about = None)]
struct Cli {
    /// TOML configuration file (built-in registries when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pause a contract
    Pause(PauseArgs),
    /// Unpause an EVM contract
    Unpause(TargetArgs),
    /// Check whether a contract can be paused
    IsPausable {
        #[command(flatten)]
        target: TargetArgs,

        /// RPC endpoint override
        #[arg(long)]
        node_url: Option<String>,
    },
    /// Show the signing identity derived for a chain
    Signer {
        #[arg(long)]
        network: NetworkId,

        #[arg(long)]
        chain: String,

        #[arg(long)]
        derivation_path: Option<String>,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// ethereum | near
    #[arg(long)]
    network: NetworkId,

    /// Chain id: number for ethereum, name for near
    #[arg(long)]
    chain: String,

    /// Contract address or account id
    #[arg(long)]
    account: String,
}

#[derive(Args)]
struct PauseArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// NEAR controller contract (defaults to near.default_controller)
    #[arg(long)]
    controller: Option<String>,

    /// Pause method the controller forwards
    #[arg(long)]
    method: Option<String>,

    /// Pause arguments as JSON
    #[arg(long)]
    args: Option<String>,

    /// NEAR signer account (defaults to the derived implicit account)
    #[arg(long)]
    sender: Option<String>,

    #[arg(long)]
    node_url: Option<String>,

    #[arg(long)]
    derivation_path: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path),
        None => default_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability, cli.log_level.as_deref());
    tracing::debug!(
        evm_chains = config.evm.chains.len(),
        near_chains = config.near.chains.len(),
        "Configuration loaded"
    );

    match run(cli.command, &config).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            if let Some(cause) = e.cause() {
                eprintln!("Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &PauseConfig) -> Result<String, PauseSdkError> {
    let sdk = PauseSdk::new(config);

    match command {
        Commands::Pause(args) => {
            let request = pause_request(args, config)?;
            let tx_hash = sdk.pause(&request).await?;
            Ok(format!("Paused {} (tx {})", request.account_id(), tx_hash))
        }
        Commands::Unpause(target) => {
            let request = UnpauseRequest::new(target.network, chain_arg(target.network, &target.chain), target.account);
            let tx_hash = sdk.unpause(&request).await?;
            Ok(format!("Unpaused {} (tx {})", request.account_id, tx_hash))
        }
        Commands::IsPausable { target, node_url } => {
            let mut query = PausableQuery::new(target.network, chain_arg(target.network, &target.chain), target.account);
            query.node_url = node_url;
            Ok(sdk.is_pausable(&query).await?.to_string())
        }
        Commands::Signer {
            network,
            chain,
            derivation_path,
        } => {
            let info = sdk.signer_info(network, &chain_arg(network, &chain), derivation_path.as_deref())?;
            Ok(format!(
                "derivation_path: {}\npublic_key: {}\naccount: {}",
                info.derivation_path, info.public_key, info.account
            ))
        }
    }
}

fn pause_request(args: PauseArgs, config: &PauseConfig) -> Result<PauseRequest, PauseSdkError> {
    let chain_id = chain_arg(args.target.network, &args.target.chain);

    match args.target.network {
        NetworkId::Ethereum => Ok(PauseRequest::Evm(EvmPauseRequest::new(chain_id, args.target.account))),
        NetworkId::Near => {
            let controller = args
                .controller
                .or_else(|| config.near.default_controller.clone())
                .ok_or_else(|| PauseSdkError::invalid("--controller is required for NEAR"))?;
            let method_args = args
                .args
                .as_deref()
                .map(serde_json::from_str::<Value>)
                .transpose()
                .map_err(|e| PauseSdkError::invalid(format!("--args is not valid JSON: {}", e)))?;

            let mut request = NearPauseRequest::new(chain_id, args.target.account, controller);
            request.method_name = args.method;
            request.method_args = method_args;
            request.sender = args.sender;
            request.node_url = args.node_url;
            request.derivation_path = args.derivation_path;
            Ok(PauseRequest::Near(request))
        }
    }
}

/// EVM chains are addressed by number, NEAR chains by name.
fn chain_arg(network: NetworkId, chain: &str) -> ChainIdArg {
    match (network, chain.parse::<u64>()) {
        (NetworkId::Ethereum, Ok(id)) => ChainIdArg::Number(id),
        _ => ChainIdArg::Name(chain.to_string()),
    }
}
