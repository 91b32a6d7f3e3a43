use anyhow::Result;
use aqscan::{analyze_parquet_file, check_input, cli::Cli, report};
use clap::Parser;
use std::{io, process::exit};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = match Cli::parse().resolve() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{:?}", e);
            exit(1);
        }
    };
    info!(path = %cfg.path.display(), target_year = cfg.target_year, "startup");

    // ─── 3) the file must exist before anything is read ─────────────
    if let Err(err) = check_input(&cfg) {
        println!("✘ {}", err);
        error!("{}", err);
        exit(1);
    }

    // ─── 4) analyze; a processing fault is reported, not fatal ───────
    println!("Analyzing Parquet file: {}", cfg.path.display());
    match analyze_parquet_file(&cfg) {
        Ok(report) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::render(&report, &mut out)?;
        }
        Err(e) => {
            println!("✘ Error analyzing Parquet file: {}", e);
            error!("{:?}", e);
        }
    }

    info!("done");
    Ok(())
}
