//! sparseclust binary.
//!
//! Clusters labels from a sparse distance matrix (for example the output of `usearch -calc_distmx`).
//! Command syntax is:
//!  sparseclust --input distmx --output clusters --cutoff f [--includeequal bool] [--method m] [--layout l]
//!
//! - --input        : text file with one edge `label1 label2 distance` by line, whitespace separated.
//!   Lines with less than 3 fields are skipped.
//!
//! - --output       : tab separated file of cluster assignments, sorted by cluster id then label.
//!
//! - --cutoff       : distance cutoff, must be > 0.
//!
//! - --includeequal : true (default) means edges at distance equal to cutoff can merge (<=),
//!   false asks for a strict comparison (<).
//!
//! - --method       : single (default), complete (streaming, depends on input order)
//!   or exact (complete linkage after buffering the qualifying edges).
//!
//! - --layout       : label dumps one row `id \t label` by label, cluster dumps one row `id \t m1, m2, ...` by cluster.
//!   Default is label for single linkage, cluster otherwise.
//!
//! Logging is driven by RUST_LOG, for example RUST_LOG=sparseclust=info.

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command};

use std::path::Path;

use sparseclust::prelude::*;

#[doc(hidden)]
fn parse_cluster_params(matches: &ArgMatches) -> Result<ClusterParams<f64>, anyhow::Error> {
    log::debug!("in parse_cluster_params");
    //
    let cutoff = *matches
        .get_one::<f64>("cutoff")
        .ok_or_else(|| anyhow!("cutoff is required"))?;
    let include_equal = *matches.get_one::<bool>("includeequal").unwrap_or(&true);
    let method = match matches.get_one::<String>("method") {
        Some(str) => str.parse::<Linkage>()?,
        None => Linkage::Single,
    };
    let mut params = ClusterParams::new(cutoff, include_equal, method)?;
    if let Some(str) = matches.get_one::<String>("layout") {
        params.set_layout(str.parse::<OutputLayout>()?);
    }
    Ok(params)
} // end of parse_cluster_params

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let params = parse_cluster_params(matches)?;
    let input = matches
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("input file is required"))?;
    let output = matches
        .get_one::<String>("output")
        .ok_or_else(|| anyhow!("output file is required"))?;
    log::info!("input file : {:?}, output file : {:?}", input, output);
    //
    let assignment = cluster_file(Path::new(input), params)?;
    write_assignment_to_path(Path::new(output), &assignment, params.get_layout())?;
    Ok(())
} // end of run

pub fn main() {
    env_logger::Builder::from_default_env().init();
    log::info!("logger initialized from default environment");
    //
    let matches = Command::new("sparseclust")
        .about("Single or complete linkage clustering from a sparse distance matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .long("input")
                .required(true)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(String))
                .help("file of edges : label1 label2 distance"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(true)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(String))
                .help("file to dump cluster assignments"),
        )
        .arg(
            Arg::new("cutoff")
                .long("cutoff")
                .required(true)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .help("distance cutoff for clustering, must be greater than 0"),
        )
        .arg(
            Arg::new("includeequal")
                .long("includeequal")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(bool))
                .default_value("true")
                .help("include distances equal to cutoff, set to false for a strict comparison"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(["single", "complete", "exact"])
                .default_value("single")
                .help("clustering method"),
        )
        .arg(
            Arg::new("layout")
                .long("layout")
                .required(false)
                .action(ArgAction::Set)
                .value_parser(["label", "cluster"])
                .help("one row by label or one row by cluster. Default depends on method"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        log::error!("exiting with error {:#}", e);
        eprintln!("sparseclust: {:#}", e);
        std::process::exit(1);
    }
} // end of main
