use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "texreport", about = "pdflatex report compiler and pgfplots generator", version)]
pub struct Cli {
    /// JSON configuration file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log progress to stderr. RUST_LOG takes precedence when set.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile a .tex file into a PDF.
    Compile {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Working directory for pdflatex and destination of the PDF.
        /// Defaults to the directory containing SOURCE.
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,
    },

    /// Write a pgfplots time-series script to pgfplot-<NAME>.tex.
    Plot {
        #[arg(long)]
        name: String,

        /// Extra options for the axis environment.
        #[arg(long = "axis-options")]
        axis_options: String,

        /// Options for the \addplot command.
        #[arg(long = "plot-options")]
        plot_options: String,

        /// JSON array of [timestamp, value] pairs. Read from stdin when omitted or "-".
        #[arg(long)]
        points: Option<PathBuf>,

        /// Defaults to the configured reports directory.
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
