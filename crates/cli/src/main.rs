use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use b3session_corelib as core;
use b3session_corelib::config::Config;
use b3session_corelib::Digest;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "b3sess", version, about = "BLAKE3 streaming hasher")]
struct Cli {
    /// TOML file providing chunk_size / uppercase defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Bytes fed to the session per update
    #[arg(long, global = true)]
    chunk_size: Option<usize>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash files (stdin when none are given) or a hex literal
    Hash {
        files: Vec<PathBuf>,
        /// Hash the bytes of this hex string instead of reading input
        #[arg(long, conflicts_with = "files")]
        hex: Option<String>,
        /// Print upper-case hex
        #[arg(long)]
        upper: bool,
    },
    /// Compare the digest of FILE (or stdin) against EXPECTED
    Check {
        expected: String,
        file: Option<PathBuf>,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("B3SESS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>, chunk_size: Option<usize>) -> Result<Config> {
    let mut cfg = match path {
        Some(p) => Config::load(p).with_context(|| format!("loading {}", p.display()))?,
        None => Config::default(),
    };
    if let Some(n) = chunk_size {
        cfg.chunk_size = n;
    }
    cfg.validate()?;
    debug!(?cfg, "resolved config");
    Ok(cfg)
}

fn hash_input(file: Option<&Path>, chunk_size: usize) -> Result<Digest> {
    match file {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            core::hash_reader(f, chunk_size).with_context(|| format!("reading {}", path.display()))
        }
        None => core::hash_reader(io::stdin().lock(), chunk_size).context("reading stdin"),
    }
}

fn render(digest: &Digest, upper: bool) -> String {
    if upper {
        digest.to_hex_upper()
    } else {
        digest.to_hex()
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Hash { files, hex, upper }) => {
            let cfg = load_config(cli.config.as_deref(), cli.chunk_size)?;
            let upper = upper || cfg.uppercase;
            if let Some(literal) = hex {
                let bytes = hex::decode(literal.trim()).context("--hex must be valid hex")?;
                println!("{}", render(&core::compute(&bytes), upper));
            } else if files.is_empty() {
                let digest = hash_input(None, cfg.chunk_size)?;
                println!("{}  -", render(&digest, upper));
            } else {
                for path in &files {
                    let digest = hash_input(Some(path), cfg.chunk_size)?;
                    println!("{}  {}", render(&digest, upper), path.display());
                }
            }
        }
        Some(Commands::Check { expected, file }) => {
            let cfg = load_config(cli.config.as_deref(), cli.chunk_size)?;
            let expected: Digest = expected
                .parse()
                .context("expected digest must be 64 hex characters")?;
            let name = file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".into());
            let actual = hash_input(file.as_deref(), cfg.chunk_size)?;
            if actual == expected {
                println!("{name}: OK");
            } else {
                println!("{name}: FAILED (got {actual})");
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            println!("b3sess {} ready", core::version());
            println!("Try: `b3sess hash <FILE>...` or `b3sess check <DIGEST> <FILE>`");
        }
    }
    Ok(ExitCode::SUCCESS)
}
