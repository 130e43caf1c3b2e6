use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scrip",
    about = "Scrip: UTXO ledger validation engine",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate an Ed25519 key pair
    Keygen(KeygenArgs),
    /// Print a transaction's hash
    Hash(HashArgs),
    /// Sign one input of a transaction
    Sign(SignArgs),
    /// Check a transaction against a pool snapshot
    Validate(ValidateArgs),
    /// Run one epoch over a batch of proposed transactions
    Process(ProcessArgs),
}

#[derive(Args)]
pub struct KeygenArgs {
    /// 32-byte secret as hex; random when omitted
    #[arg(long)]
    pub seed: Option<String>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Transaction JSON file
    pub tx: PathBuf,
}

#[derive(Args)]
pub struct SignArgs {
    /// Transaction JSON file
    pub tx: PathBuf,
    /// Index of the input to sign
    #[arg(short, long)]
    pub input: usize,
    /// 32-byte secret as hex
    #[arg(short, long)]
    pub key: String,
    /// Write the signed transaction here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Pool snapshot JSON file
    #[arg(short, long)]
    pub pool: PathBuf,
    /// Transaction JSON file
    pub tx: PathBuf,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Pool snapshot JSON file
    #[arg(short, long)]
    pub pool: PathBuf,
    /// JSON array of proposed transactions, in order
    #[arg(short, long)]
    pub batch: PathBuf,
    /// Write the updated pool snapshot here
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Engine configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
