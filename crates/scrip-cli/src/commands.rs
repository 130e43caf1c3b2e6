use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use scrip_crypto::{Ed25519Verifier, SigningKey};
use scrip_engine::{BatchReport, EngineConfig, Rejection, TxHandler, Verdict};
use scrip_pool::UtxoPool;
use scrip_types::{Transaction, TxHash};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Keygen(args) => cmd_keygen(args, format),
        Command::Hash(args) => cmd_hash(args, format),
        Command::Sign(args) => cmd_sign(args),
        Command::Validate(args) => cmd_validate(args, format),
        Command::Process(args) => cmd_process(args, format),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn read_pool(path: &Path) -> anyhow::Result<UtxoPool> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    UtxoPool::from_json(&text).with_context(|| format!("parsing pool snapshot {}", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing engine config {}", path.display()))
}

fn cmd_keygen(args: KeygenArgs, format: OutputFormat) -> anyhow::Result<()> {
    let key = match args.seed {
        Some(seed) => SigningKey::from_hex(&seed).context("invalid --seed")?,
        None => SigningKey::generate(),
    };
    let secret = hex::encode(key.as_bytes());
    let credential = key.credential().to_hex();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "secret": secret, "credential": credential })
        ),
        OutputFormat::Text => {
            println!("{} {}", "secret:    ".dimmed(), secret.red());
            println!("{} {}", "credential:".dimmed(), credential.cyan());
        }
    }
    Ok(())
}

fn cmd_hash(args: HashArgs, format: OutputFormat) -> anyhow::Result<()> {
    let tx: Transaction = read_json(&args.tx)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "hash": tx.hash() })),
        OutputFormat::Text => println!("{}", tx.hash().to_string().yellow()),
    }
    Ok(())
}

fn cmd_sign(args: SignArgs) -> anyhow::Result<()> {
    let tx: Transaction = read_json(&args.tx)?;
    let key = SigningKey::from_hex(&args.key).context("invalid --key")?;
    let signed = key
        .sign_input(&tx, args.input)
        .with_context(|| format!("signing input {}", args.input))?;
    let json = serde_json::to_string_pretty(&signed)?;
    match args.out {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Signed input {} → {}", "✓".green(), args.input, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    valid: bool,
    hash: TxHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    fee: Option<i128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a Rejection>,
}

fn cmd_validate(args: ValidateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let pool = read_pool(&args.pool)?;
    let tx: Transaction = read_json(&args.tx)?;
    let handler = TxHandler::new(&pool, Ed25519Verifier);
    let result = handler.check_tx(&tx);

    match format {
        OutputFormat::Json => {
            let verdict = ValidateOutput {
                valid: result.is_ok(),
                hash: tx.hash(),
                fee: result.as_ref().ok().map(|v| v.fee()),
                reason: result.as_ref().err(),
            };
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        OutputFormat::Text => match &result {
            Ok(validated) => println!(
                "{} {} valid (fee {})",
                "✓".green().bold(),
                validated.tx_hash.short_hex().yellow(),
                validated.fee()
            ),
            Err(reason) => println!(
                "{} {} rejected: {}",
                "✗".red().bold(),
                tx.hash().short_hex().yellow(),
                reason
            ),
        },
    }
    Ok(())
}

fn cmd_process(args: ProcessArgs, format: OutputFormat) -> anyhow::Result<()> {
    let pool = read_pool(&args.pool)?;
    let proposed: Vec<Transaction> = read_json(&args.batch)?;
    let config = read_config(args.config.as_deref())?;

    let mut handler = TxHandler::with_config(&pool, Ed25519Verifier, config)?;
    let report = handler.process_batch(&proposed);

    if let Some(path) = &args.out {
        let snapshot = handler.pool().to_json()?;
        fs::write(path, snapshot).with_context(|| format!("writing {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, handler.pool()),
    }
    Ok(())
}

fn print_report(report: &BatchReport, pool: &UtxoPool) {
    for outcome in &report.outcomes {
        let hash = outcome.tx_hash.short_hex();
        match &outcome.verdict {
            Verdict::Accepted { fee } => println!(
                "  {} #{:<3} {}  fee {}",
                "accepted".green(),
                outcome.position,
                hash.yellow(),
                fee
            ),
            Verdict::Rejected { reason } => println!(
                "  {} #{:<3} {}  {}",
                "rejected".red(),
                outcome.position,
                hash.yellow(),
                reason.to_string().dimmed()
            ),
            Verdict::Deferred => println!(
                "  {} #{:<3} {}",
                "deferred".blue(),
                outcome.position,
                hash.yellow()
            ),
        }
    }
    println!(
        "\n{} {} accepted, {} rejected, {} deferred",
        "✓".green().bold(),
        report.accepted_count().to_string().bold(),
        report.rejected_count(),
        report.deferred_count()
    );
    println!(
        "  Pool: {} outputs, total value {}",
        pool.len().to_string().bold(),
        pool.total_value()
    );
}
