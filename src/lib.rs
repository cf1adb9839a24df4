//! texreport - compile LaTeX reports with pdflatex and generate pgfplots time-series snippets.
//!
//! ```no_run
//! use std::path::Path;
//! use texreport::{pgfplot, Compiler, PlotSpec};
//!
//! # async fn run() -> texreport::Result<()> {
//! let spec = PlotSpec::new("temp", "xlabel=Date", "blue", vec![(1_700_000_000, 21.5)]);
//! let script = pgfplot(&spec, Path::new("/tmp/reports"))?;
//!
//! let compiler = Compiler::from_config_path("/etc/texreport/pdflatex.json")?;
//! let pdf = compiler.compile(Path::new("/tmp/reports/report.tex"), None).await?;
//! # let _ = (script, pdf);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod latex;
pub mod pgfplot;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use latex::Compiler;
pub use pgfplot::{parse_points, pgfplot, PlotSpec, Point};
