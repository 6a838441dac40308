//! Command line front end: runs the configured generation pipeline and writes
//! the selected output formats, or re-reads an exported edge list to extract
//! label sequences.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};
use tracing::info;

use subshift::config::{Algorithm, Config, Mode, OutputFormat};
use subshift::forbidden;
use subshift::generate::GraphGenerator;
use subshift::graph::{Graph, Node};
use subshift::minimization::minimize;
use subshift::prune::prune;
use subshift::{csv, dot};

#[derive(Parser)]
#[command(name = "subshift", about = "Generate and reduce subshift-of-finite-type graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the generation pipeline described by a JSON configuration file.
    Generate {
        /// Path to the configuration file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Extract the edge label sequences of a previously exported edge list.
    Sequences {
        /// Path to an edge list CSV.
        #[arg(long)]
        input: PathBuf,
        /// Length of the sequences to extract.
        #[arg(long)]
        length: usize,
    },
}

#[derive(Tabled)]
struct Summary {
    combination: String,
    nodes: usize,
    edges: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate { config } => generate(&config),
        Command::Sequences { input, length } => sequences(&input, length),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn generate(config_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut config = Config::from_path(config_path)?;
    config.validate()?;
    if config.algorithm == Algorithm::DeBruijn && config.mode == Mode::Custom {
        config.normalize_for_de_bruijn()?;
    }

    let generator = match config.algorithm {
        Algorithm::Beal => GraphGenerator::beal(config.alphabet_size, config.period),
        Algorithm::DeBruijn => GraphGenerator::de_bruijn(
            config.alphabet_size,
            config
                .forbidden_word_length
                .expect("validation and normalization provide the word length"),
            config.period,
        ),
    };

    let alphabet = config.alphabet();
    let combinations: Box<dyn Iterator<Item = Vec<Node>>> = match config.mode {
        Mode::Custom => Box::new(std::iter::once(forbidden::custom_combination(
            config.forbidden_words.as_deref().unwrap_or(&[]),
        ))),
        Mode::AllPatterns => {
            let per_position = config
                .forbidden_per_position
                .clone()
                .expect("validation requires per-position counts");
            let word_length = config
                .forbidden_word_length
                .expect("validation requires the word length");
            Box::new(
                forbidden::all_patterns(&alphabet, word_length, &per_position, config.period)
                    .collect::<Vec<_>>()
                    .into_iter(),
            )
        }
    };

    let mut summaries = Vec::new();
    for combination in combinations {
        let mut graph = generator.generate(&combination);
        if config.sink_less {
            graph = prune(&graph);
            if config.minimize {
                graph = minimize(&graph);
            }
        }

        for format in &config.output.formats {
            write_output(&config.output.directory, *format, &combination, &graph)?;
        }

        summaries.push(Summary {
            combination: combination_stem(&combination),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        });
    }

    info!("processed {} combinations", summaries.len());
    println!("{}", Table::new(summaries));
    Ok(())
}

fn write_output(
    directory: &Path,
    format: OutputFormat,
    combination: &[Node],
    graph: &Graph,
) -> Result<(), Box<dyn Error>> {
    let (subdirectory, extension, content) = match format {
        OutputFormat::Edges => ("edges", "csv", csv::edges_csv(graph)),
        OutputFormat::Matrix => ("adjacency_matrix", "csv", csv::adjacency_matrix_csv(graph)),
        OutputFormat::Dot => ("dot", "dot", dot::dot_representation(graph)),
    };

    let target_directory = directory.join(subdirectory);
    fs::create_dir_all(&target_directory)?;
    let file_path = target_directory.join(format!("{}.{extension}", combination_stem(combination)));
    fs::write(&file_path, content)?;
    info!("saved {}", file_path.display());
    Ok(())
}

fn combination_stem(combination: &[Node]) -> String {
    if combination.is_empty() {
        return "none".to_string();
    }
    combination
        .iter()
        .map(|node| format!("{}@{}", node.label(), node.phase()))
        .join("-")
}

fn sequences(input: &Path, length: usize) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(input)?;
    let graph = csv::parse_edges_csv(&raw)?;
    for sequence in graph.edge_label_sequences(length).into_iter().sorted() {
        println!("{sequence}");
    }
    Ok(())
}
