//! Chain parameters front end
//!
//! Prints the verified parameters of the selected network, or searches for
//! a genesis nonce when defining a new one.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainparams::config::{default_data_dir, StartupConfig, TESTNET_ENV};
use chainparams::constants::COIN;
use chainparams::node::{mine_genesis, GenesisInfo};
use chainparams::params::{genesis_spec, select_params_from_config, Base58Type, ChainParams};

#[derive(Parser)]
#[command(name = "chainparams")]
#[command(about = "Network parameters and genesis blocks", long_about = None)]
struct Cli {
    /// Use the test network
    #[arg(long, global = true, env = TESTNET_ENV)]
    testnet: bool,
    /// Root data directory (default: ~/.chainparams)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the selected network's parameters
    Show {
        /// Print the full parameter set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search for a genesis nonce starting from the given value
    MineGenesis {
        #[arg(short, long, default_value = "0")]
        start_nonce: u32,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = StartupConfig {
        testnet: cli.testnet,
        data_dir: cli.data_dir.unwrap_or_else(default_data_dir),
    };

    match cli.command {
        Commands::Show { json } => {
            let params = select_params_from_config(config.testnet)
                .context("failed to initialize chain parameters")?;
            if json {
                println!("{}", serde_json::to_string_pretty(params)?);
            } else {
                print_params(params, &config);
            }
        }
        Commands::MineGenesis { start_nonce } => {
            let spec = genesis_spec(config.network());
            let mined = mine_genesis(&spec, start_nonce)?;
            let info = GenesisInfo::new(&mined.block);

            println!("Genesis search ({})", config.network());
            println!("  Hash:        {}", info.hash);
            println!("  Merkle Root: {}", info.merkle_root);
            println!("  Time:        {}", info.time);
            println!("  Bits:        0x{:08x}", info.bits);
            println!("  Nonce:       {}", info.nonce);
            println!("  Attempts:    {}", mined.attempts);
            if mined.time_bumps > 0 {
                println!("  Time bumps:  {}", mined.time_bumps);
            }
        }
    }

    Ok(())
}

fn print_params(params: &ChainParams, config: &StartupConfig) {
    let genesis = GenesisInfo::new(&params.genesis);

    println!("Network:       {}", params.network);
    println!("Data dir:      {}", config.network_data_dir(params).display());
    println!("Magic:         {}", hex::encode(params.message_start));
    println!("P2P port:      {}", params.default_port);
    println!("RPC port:      {}", params.rpc_port);
    println!();

    println!("Genesis Block:");
    println!("  Hash:        {}", genesis.hash);
    println!("  Merkle Root: {}", genesis.merkle_root);
    println!("  Time:        {}", genesis.time);
    println!("  Bits:        0x{:08x}", genesis.bits);
    println!("  Nonce:       {}", genesis.nonce);
    println!();

    println!("Consensus:");
    println!("  PoW limit:   0x{:x}", params.pow_limit);
    println!("  PoS limit:   0x{:x}", params.pos_limit);
    println!("  Reward:      {} coins", params.basic_pow_reward / COIN);
    println!("  Maturity:    {}", params.coinbase_maturity);
    println!("  Stake age:   {}s", params.stake_min_age);
    println!("  Last PoW:    {}", params.last_pow_block);
    println!("  Max money:   {}", params.max_money);
    println!();

    println!("Address prefixes:");
    for kind in Base58Type::ALL {
        println!("  {:<16} {}", format!("{kind:?}"), hex::encode(params.base58_prefix(kind)));
    }
    println!("Fixed seeds:   {}", params.fixed_seeds.len());
}
