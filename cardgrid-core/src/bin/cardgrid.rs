use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use cardgrid_core::catalog::{Catalog, Facet, FacetValues};
use cardgrid_core::cli::{CliArgs, Command, HELP};
use cardgrid_core::config::CatalogConfig;
use cardgrid_core::logging::init_tracing;
use cardgrid_core::render::{write_json_line, write_msgpack_frame, OutputFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match CatalogConfig::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_level, args.verbose);

    let catalog = Catalog::new(config.page_size, config.output.sink(io::stdout()));
    for action in args.initial_actions() {
        catalog.dispatch(action);
    }

    if catalog.load(&config.source, &config.parse).await.is_err() {
        return ExitCode::FAILURE;
    }
    if args.once {
        return ExitCode::SUCCESS;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "failed to read command");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Act(action)) => {
                catalog.dispatch(action);
            }
            Ok(Command::Facets) => {
                if let Err(err) = print_facets(config.output, &catalog.facets()) {
                    warn!(error = %err, "failed to print facets");
                }
            }
            Ok(Command::Help) => eprintln!("{HELP}"),
            Ok(Command::Quit) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    info!("session closed");
    ExitCode::SUCCESS
}

fn print_facets(format: OutputFormat, facets: &FacetValues) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for facet in Facet::ALL {
                let options: Vec<_> = facet_options(facets, facet);
                writeln!(out, "{facet}: {}", options.join(", "))?;
            }
        }
        OutputFormat::Json => write_json_line(&mut out, facets)?,
        OutputFormat::Msgpack => write_msgpack_frame(&mut out, facets)?,
    }
    out.flush()
}

fn facet_options(facets: &FacetValues, facet: Facet) -> Vec<String> {
    facets
        .options(facet)
        .map(|value| if value.is_empty() { "(blank)".to_owned() } else { value.to_owned() })
        .collect()
}
