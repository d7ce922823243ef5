//! fraudmart-gen: writes the synthetic e-commerce fraud dataset.
//!
//! Usage:
//!   fraudmart-gen --seed 42 --out ./output
//!   fraudmart-gen --config gen.json --orders 100000 --json

use anyhow::{bail, Context, Result};
use fraudmart_core::{
    config::GeneratorConfig, engine::GeneratorEngine, export, summary::GenerationSummary,
};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    out_dir: String,
    files: Vec<String>,
    summary: &'a GenerationSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let out_dir = PathBuf::from(find_arg(&args, "--out").unwrap_or("./output"));

    let mut config = match find_arg(&args, "--config") {
        Some(path) => {
            log::info!("loading configuration from {path}");
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;
    config.customers = parse_arg(&args, "--customers", config.customers)?;
    config.orders = parse_arg(&args, "--orders", config.orders)?;
    config.products = parse_arg(&args, "--products", config.products)?;
    if args.iter().any(|a| a == "--stamp-now") {
        config.updated_at = Some(chrono::Local::now().naive_local());
    }

    if !json_mode {
        println!("fraudmart-gen");
        println!("  seed:       {}", config.seed);
        println!("  customers:  {}", config.customers);
        println!("  orders:     {}", config.orders);
        println!("  range:      {} .. {}", config.start_date, config.end_date);
        println!("  out:        {}", out_dir.display());
        println!();
    }

    let engine = GeneratorEngine::new(config).context("invalid generator configuration")?;
    let dataset = engine.run()?;
    let files = export::write_all(&dataset, &out_dir)
        .with_context(|| format!("writing CSV files to {}", out_dir.display()))?;
    let summary = GenerationSummary::from_dataset(&dataset);

    if json_mode {
        let report = RunReport {
            out_dir: out_dir.display().to_string(),
            files: files.iter().map(|p| p.display().to_string()).collect(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{summary}");
        println!();
        println!("=== FILES ===");
        for path in &files {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Value of `flag` parsed as `T`, or `default` when the flag is absent.
/// A flag with a missing or unparsable value is an error.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match find_arg(args, flag) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid value {raw:?} for {flag}")),
        None if args.iter().any(|a| a == flag) => bail!("{flag} needs a value"),
        None => Ok(default),
    }
}
