//! CLI parse and pipeline tests.

use super::Cli;
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[allow(dead_code)]
#[path = "../../../../pkgstats-core/tests/common/listing_server.rs"]
mod listing_server;
