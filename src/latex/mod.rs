//! pdflatex invocation.
//!
//! The executable is resolved once from configuration. Each [`Compiler::compile`] call
//! removes any stale PDF, runs pdflatex in non-stop mode with the output directory as its
//! working directory, and maps the exit status onto [`Error`].

use std::{
    fs,
    io::{self, Read},
    path::{self, Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::{process::Command, task, time::timeout};

use crate::{
    config::Config,
    error::{Error, Result},
};

pub mod diagnostics;

pub use diagnostics::{extract_latex_errors, ERROR_MARKER};

pub const OUTPUT_EXTENSION: &str = "pdf";

/// Shell convention for "command not found".
const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Clone)]
pub struct Compiler {
    pdflatex: PathBuf,
    timeout: Option<Duration>,
}

impl Compiler {
    /// Load configuration from `config_path` and validate the executable.
    pub fn from_config_path(config_path: impl AsRef<Path>) -> Result<Self> {
        let cfg = Config::load(config_path)?;
        Self::from_config(&cfg)
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut compiler = Self::new(&cfg.pdflatex_path)?;
        compiler.timeout = cfg.compile_timeout;
        Ok(compiler)
    }

    /// Fails with [`Error::Configuration`] unless `pdflatex` is an existing regular file.
    pub fn new(pdflatex: impl Into<PathBuf>) -> Result<Self> {
        let pdflatex = pdflatex.into();
        if !pdflatex.is_file() {
            return Err(Error::configuration(format!(
                "file not found : {}",
                pdflatex.display()
            )));
        }
        Ok(Self { pdflatex, timeout: None })
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.pdflatex
    }

    /// Compile `source` into a PDF placed in `output_dir`.
    ///
    /// `output_dir` defaults to the directory holding `source`. Success is decided by the
    /// exit status alone; the returned path is not checked for existence.
    pub async fn compile(&self, source: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
        if source.as_os_str().is_empty() {
            return Err(Error::invalid_argument("missing source parameter"));
        }
        if !source.exists() {
            return Err(Error::invalid_argument(format!(
                "path not found : {}",
                source.display()
            )));
        }
        if !source.is_file() {
            return Err(Error::invalid_argument(format!(
                "path is not a file : {}",
                source.display()
            )));
        }

        let source = path::absolute(source)?;
        let output_dir = match output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            // an absolute file path always has a parent
            _ => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        if !output_dir.is_dir() {
            return Err(Error::invalid_argument(format!(
                "output directory not found : {}",
                output_dir.display()
            )));
        }

        let pdf_path = output_path(&source, &output_dir)?;
        if pdf_path.exists() {
            tracing::debug!(path = %pdf_path.display(), "Removing stale output");
            fs::remove_file(&pdf_path)?;
        }

        // stdout and stderr share one pipe so lines keep the order pdflatex wrote them in
        let (mut reader, writer) = io::pipe()?;
        let mut cmd = Command::new(&self.pdflatex);
        cmd.arg("-interaction=nonstopmode")
            .arg(&source)
            .current_dir(&output_dir)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .kill_on_drop(true);
        tracing::debug!(
            pdflatex = %self.pdflatex.display(),
            source = %source.display(),
            cwd = %output_dir.display(),
            "Running pdflatex"
        );

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        // release our copies of the write end, or the reader never sees EOF
        drop(cmd);
        let drain = task::spawn_blocking(move || -> io::Result<Vec<u8>> {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        });

        let status = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    tracing::warn!(source = %source.display(), "pdflatex timed out after {:?}", limit);
                    child.kill().await.ok();
                    return Err(Error::Timeout { limit });
                }
            },
            None => child.wait().await?,
        };
        let raw = drain.await.map_err(io::Error::other)??;

        if status.success() {
            tracing::info!(pdf = %pdf_path.display(), "Compiled {}", source.display());
            return Ok(pdf_path);
        }

        let code = status.code();
        if code == Some(EXIT_NOT_FOUND) {
            return Err(Error::ExecutableNotFound(self.pdflatex.clone()));
        }

        let output = String::from_utf8_lossy(&raw).into_owned();
        let errors = extract_latex_errors(&output);
        let message = match code {
            Some(c) => format!("{} returned non-zero exit status {}", self.pdflatex.display(), c),
            None => format!("{} was terminated by a signal", self.pdflatex.display()),
        };
        tracing::warn!(source = %source.display(), errors = errors.len(), "{}", message);

        Err(Error::Compile { message, errors, output })
    }

    fn spawn_error(&self, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::NotFound {
            Error::ExecutableNotFound(self.pdflatex.clone())
        } else {
            Error::Io(e)
        }
    }
}

/// `<output_dir>/<source stem>.pdf`
pub fn output_path(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| Error::invalid_argument(format!("path is not a file : {}", source.display())))?;
    Ok(output_dir.join(Path::new(file_name).with_extension(OUTPUT_EXTENSION)))
}
