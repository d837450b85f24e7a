//! `pkgstats <arch>`: fetch, parse, filter, download, report.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pkgstats_core::config::PkgstatsConfig;
use pkgstats_core::download::download_all;
use pkgstats_core::{fetch, filter, listing, report};

use super::Cli;

/// Runs the whole pipeline once, saving indexes into `dest_dir`.
///
/// The report and verbose progress go to `out`; the empty-selection warning
/// goes to `warn`. The top-ten report covers the full listing and is printed
/// even when the download batch aborts; the batch error is returned afterwards.
pub fn run_stats<O: Write, E: Write>(
    cli: &Cli,
    cfg: &PkgstatsConfig,
    dest_dir: &Path,
    out: &mut O,
    warn: &mut E,
) -> Result<()> {
    let arch = cli.arch.to_lowercase();
    let mirror = cli.url.as_deref().unwrap_or(&cfg.mirror_url);
    let opts = cfg.fetch_options();
    tracing::info!("arch={} mirror={}", arch, mirror);

    let body = fetch::fetch_text(mirror, &opts).context("fetching mirror listing")?;
    let records = listing::parse_listing(mirror, &body).context("parsing mirror listing")?;

    let urls = filter::urls_for_arch(&arch, &records);
    tracing::info!("{} of {} indexes match {}", urls.len(), records.len(), arch);

    let downloaded = if urls.is_empty() {
        writeln!(
            warn,
            "No Contents index found for architecture '{}'; nothing to download.",
            arch
        )?;
        Ok(())
    } else {
        let verbose = cli.verbose;
        let batch = download_all(&urls, dest_dir, &opts, |name| {
            if verbose {
                if let Err(e) = writeln!(out, "Downloading {}. Hold tight...", name) {
                    tracing::warn!("progress line for {} not written: {}", name, e);
                }
            }
        });
        if let (true, Ok(done)) = (verbose, &batch) {
            if let Some(line) = done.summary_line() {
                writeln!(out, "{}", line)?;
            }
        }
        batch.map(|_| ())
    };

    write!(out, "{}", report::render_top(&records))?;
    out.flush()?;

    downloaded.context("downloading Contents indexes")?;
    Ok(())
}
