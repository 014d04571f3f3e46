//! `mwst <INPUT> <OUTPUT>`: reads a graph, writes its minimum spanning forest.
//!
//! Set `MWST_LOG=debug` (or `trace`) to log the run to stderr.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};

use mwst::graph::io::{parse_graph, write_forest};
use mwst::graph::kruskal::{Kruskal, KruskalConfig};

fn make_options_parser() -> Command {
    Command::new("mwst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Minimum weight spanning forest of an undirected graph (Kruskal)")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Graph file: vertex count, edge count, then one `u v weight` line per edge")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("File the forest is written to")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("drain")
                .long("drain")
                .help("Examine every edge instead of stopping once the tree spans the graph")
                .action(ArgAction::SetTrue),
        )
}

fn run(input: &Path, output: &Path, config: KruskalConfig) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let graph =
        parse_graph(&text).with_context(|| format!("failed to parse {}", input.display()))?;

    let forest = Kruskal::with_config(graph.vertex_count(), graph.edges(), config)?.finish()?;
    log::info!(
        "{} of {} edges selected, total weight {:.1}",
        forest.len(),
        graph.edge_count(),
        forest.total_weight()
    );

    let file =
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_forest(&mut writer, &forest)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    if std::env::var("MWST_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MWST_LOG")
            .write_style("MWST_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    // clap exits with status 2 on usage errors
    let matches = make_options_parser().get_matches();
    let input = matches
        .get_one::<PathBuf>("input")
        .expect("required argument");
    let output = matches
        .get_one::<PathBuf>("output")
        .expect("required argument");
    let config = KruskalConfig {
        stop_when_spanning: !matches.get_flag("drain"),
    };
    log::debug!("mwst options: {:?}", config);

    match run(input, output, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
