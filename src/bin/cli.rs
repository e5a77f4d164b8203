use clap::Parser;
use log::{debug, error, info};
use schedule_export::{export_to_csv, read_project_file, write_report};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract schedule data (resources, tasks, assignments, relations) from a
/// project file and export it as tab-delimited text.
#[derive(Parser, Debug)]
#[command(
    name = "schedule-export",
    version,
    about = "Extract schedule data from project files and export it as tab-delimited text",
    after_help = "The destination file is overwritten without confirmation."
)]
struct Cli {
    /// Source project file (.json or .csv interchange)
    source: PathBuf,

    /// Destination file for the export
    #[arg(required_unless_present = "report")]
    dest: Option<PathBuf>,

    /// Write the free-text report instead of the tabular export
    /// (to DEST when given, else to stdout)
    #[arg(long)]
    report: bool,

    /// Reserved, currently without effect
    #[arg(long)]
    od: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> ExitCode {
    if cli.od {
        debug!("--od is reserved and currently has no effect");
    }

    let graph = match read_project_file(&cli.source) {
        Ok(graph) => graph,
        Err(err) => {
            error!("failed to load {}: {err}", cli.source.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "loaded {} resources, {} tasks, {} assignments from {}",
        graph.resources().len(),
        graph.tasks().len(),
        graph.assignments().len(),
        cli.source.display()
    );

    if cli.report {
        let result = match &cli.dest {
            Some(path) => File::create(path).and_then(|mut file| write_report(&graph, &mut file)),
            None => write_report(&graph, &mut io::stdout().lock()),
        };
        if let Err(err) = result {
            error!("failed to write report: {err}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    // clap enforces DEST whenever --report is absent
    let Some(dest) = cli.dest.as_ref() else {
        error!("a destination path is required for the tabular export");
        return ExitCode::from(2);
    };
    if let Err(err) = export_to_csv(&graph, dest) {
        error!("failed to export to {}: {err}", dest.display());
        return ExitCode::FAILURE;
    }
    info!("export written to {}", dest.display());
    ExitCode::SUCCESS
}
