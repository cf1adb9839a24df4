mod cli;
mod printer;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use printer::ReportPrinter;
use texreport::{config, parse_points, pgfplot, Compiler, Config, Error, PlotSpec, Result};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let default_level = if args.verbose { "texreport=info" } else { "texreport=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let printer = ReportPrinter { color: io::stdout().is_terminal() };

    match run(args.command, &config_path).await {
        Ok(path) => {
            printer.path(&path);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            printer.failure(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(command: Command, config_path: &Path) -> Result<PathBuf> {
    match command {
        Command::Compile { source, output_dir } => {
            let cfg = Config::load(config_path)?;
            let compiler = Compiler::from_config(&cfg)?;
            compiler.compile(&source, output_dir.as_deref()).await
        }
        Command::Plot { name, axis_options, plot_options, points, output_dir } => {
            let points_json = read_points(points.as_deref())?;
            let value: serde_json::Value = serde_json::from_str(&points_json)
                .map_err(|e| Error::invalid_argument(format!("points are not valid JSON: {}", e)))?;
            let spec = PlotSpec::new(name, axis_options, plot_options, parse_points(&value)?);
            let dir = match output_dir {
                Some(dir) => dir,
                None => {
                    let dir = config::resolve_reports_dir(config_path)?;
                    fs::create_dir_all(&dir)?;
                    dir
                }
            };
            pgfplot(&spec, &dir)
        }
    }
}

fn read_points(source: Option<&Path>) -> Result<String> {
    match source {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            if io::stdin().is_terminal() {
                return Err(Error::invalid_argument(
                    "provide points with --points FILE or via stdin",
                ));
            }
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
