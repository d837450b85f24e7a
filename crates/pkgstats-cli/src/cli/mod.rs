//! CLI for pkgstats.

pub mod diagnostic;
mod run;

use anyhow::{Context, Result};
use clap::Parser;
use pkgstats_core::config::{self, PkgstatsConfig};

pub use run::run_stats;

/// Download the Contents indexes of one architecture from a Debian mirror and
/// list the ten indexes with the most files.
#[derive(Debug, Parser)]
#[command(name = "pkgstats")]
#[command(about = "Download Debian Contents indexes and rank them by file count", long_about = None)]
pub struct Cli {
    /// Architecture of the Contents index to download: amd64, arm64, armel,
    /// armhf, i386, mips64el, mipsel, ppc64el, s390x, source, all.
    pub arch: String,

    /// Mirror directory listing the Contents indexes.
    /// Default: `mirror_url` from config.toml, else http://ftp.uk.debian.org/debian/dists/stable/main/
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Print progress and a summary while downloading.
    #[arg(short, long)]
    pub verbose: bool,

    /// Use built-in defaults; do not read or create config.toml.
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.run()
    }

    pub fn run(&self) -> Result<()> {
        let cfg = if self.no_config {
            PkgstatsConfig::default()
        } else {
            config::load_or_init()?
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let dest_dir = std::env::current_dir().context("resolving working directory")?;
        run_stats(
            self,
            &cfg,
            &dest_dir,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )
    }
}

#[cfg(test)]
mod tests;
