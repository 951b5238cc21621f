use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::core::config::VaultConfig;
use crate::crypto::kdf::derive_key;
use crate::crypto::shamir::SecretSharing;
use crate::crypto::share::{parse_base64_32, Share};
use crate::security::escrow;
use crate::security::secret::random_secret;

/// Shamir secret sharing and key-escrowed encryption
#[derive(Debug, Parser)]
#[command(name = "shamir-vault", version, about = "Split secrets into shares and escrow encryption keys")]
pub struct Cli {
    /// TOML config file (falls back to $SHAMIR_VAULT_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a 32-byte secret into shares
    Split {
        /// Base64 secret; a random one is generated and printed when omitted
        #[arg(long)]
        secret: Option<String>,
        #[arg(long)]
        threshold: Option<u32>,
        #[arg(long)]
        shares: Option<u32>,
    },
    /// Recover a secret from shares
    Combine {
        /// Shares in `<x>-<base64>` form
        #[arg(required = true, num_args = 2..)]
        shares: Vec<String>,
    },
    /// Encrypt a file and print the shares of its key
    Encrypt {
        #[arg(long)]
        password: String,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        threshold: Option<u32>,
        #[arg(long)]
        shares: Option<u32>,
    },
    /// Decrypt a file with the shares of its key
    Decrypt {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(required = true, num_args = 2..)]
        shares: Vec<String>,
    },
    /// Print the base64 key derived from a password
    DeriveKey {
        #[arg(long)]
        password: String,
    },
}

/// Executes `command`, writing user-facing output to `out`.
pub fn run<W: Write>(command: Commands, config: &VaultConfig, out: &mut W) -> anyhow::Result<()> {
    let sss = SecretSharing::new();

    match command {
        Commands::Split { secret, threshold, shares } => {
            let (threshold, share_count) = resolve_params(config, threshold, shares)?;
            let secret = match secret {
                Some(text) => zeroize::Zeroizing::new(parse_base64_32(&text, "secret")?),
                None => {
                    let secret = random_secret();
                    writeln!(out, "secret: {}", STANDARD.encode(*secret))?;
                    secret
                }
            };
            let shares = sss.split(&secret, threshold, share_count)?;
            info!(threshold, share_count, "split secret");
            write_shares(out, &shares)?;
        }
        Commands::Combine { shares } => {
            let shares = parse_shares(&shares)?;
            let secret = sss.combine(&shares)?;
            writeln!(out, "{}", STANDARD.encode(*secret))?;
        }
        Commands::Encrypt { password, input, output, threshold, shares } => {
            let (threshold, share_count) = resolve_params(config, threshold, shares)?;
            let plaintext = zeroize::Zeroizing::new(
                std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?,
            );
            let sealed = escrow::seal_with(&sss, &password, &plaintext, threshold, share_count)?;
            std::fs::write(&output, &sealed.ciphertext)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "ciphertext written");
            write_shares(out, &sealed.shares)?;
        }
        Commands::Decrypt { input, output, shares } => {
            let shares = parse_shares(&shares)?;
            let ciphertext =
                std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let plaintext = escrow::open_with(&sss, &shares, &ciphertext)?;
            std::fs::write(&output, plaintext.as_slice())
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "plaintext written");
        }
        Commands::DeriveKey { password } => {
            let key = derive_key(&password);
            writeln!(out, "{}", STANDARD.encode(*key))?;
        }
    }
    Ok(())
}

/// Command-line values win over config values; the result is validated.
fn resolve_params(
    config: &VaultConfig,
    threshold: Option<u32>,
    shares: Option<u32>,
) -> anyhow::Result<(u32, u32)> {
    let threshold = threshold.unwrap_or(config.sharing.threshold);
    let share_count = shares.unwrap_or(config.sharing.shares);
    config.check_share_limit(share_count)?;
    Ok((threshold, share_count))
}

fn parse_shares(texts: &[String]) -> anyhow::Result<Vec<Share>> {
    texts
        .iter()
        .map(|t| t.parse::<Share>().with_context(|| format!("parsing share '{}'", t)))
        .collect()
}

fn write_shares<W: Write>(out: &mut W, shares: &[Share]) -> std::io::Result<()> {
    for share in shares {
        writeln!(out, "{}", share)?;
    }
    Ok(())
}
