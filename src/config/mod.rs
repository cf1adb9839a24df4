use std::{
    env,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_PDFLATEX_PATH: &str = "/usr/local/texlive/2014/bin/i386-linux/pdflatex";

/// Environment variable overriding `pdflatex_path` from the file.
pub const PDFLATEX_PATH_ENV: &str = "TEXREPORT_PDFLATEX_PATH";

/// Raw file contents. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    pdflatex_path: Option<PathBuf>,
    reports_dir: Option<PathBuf>,
    compile_timeout_sec: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub pdflatex_path: PathBuf,
    pub reports_dir: PathBuf,
    pub compile_timeout: Option<Duration>,
}

impl Config {
    /// Read the JSON configuration at `path`, filling in defaults for absent keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text, path, env::var_os(PDFLATEX_PATH_ENV))
    }

    /// Like [`Config::load`], but a missing file yields `None` instead of an error.
    pub fn load_if_present(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path, env::var_os(PDFLATEX_PATH_ENV)).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(config = %path.display(), "No configuration file, using defaults");
                Ok(None)
            }
            Err(e) => Err(Error::configuration(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// `pdflatex_override` wins over the file value unless it is empty.
    fn parse(text: &str, path: &Path, pdflatex_override: Option<OsString>) -> Result<Self> {
        let settings: FileSettings = serde_json::from_str(text).map_err(|e| {
            Error::configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;

        let pdflatex_path = pdflatex_override
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(settings.pdflatex_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PDFLATEX_PATH));

        tracing::debug!(config = %path.display(), pdflatex = %pdflatex_path.display(), "Loaded configuration");

        Ok(Self {
            pdflatex_path,
            reports_dir: settings.reports_dir.unwrap_or_else(default_reports_dir),
            compile_timeout: settings.compile_timeout_sec.map(Duration::from_secs),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("texreport").join("pdflatex.json")
}

pub fn default_reports_dir() -> PathBuf {
    env::temp_dir().join("texreport").join("reports")
}

/// Plot output directory: `reports_dir` from the file at `path` when it exists, else the default.
pub fn resolve_reports_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    Ok(Config::load_if_present(path)?
        .map(|cfg| cfg.reports_dir)
        .unwrap_or_else(default_reports_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let p = dir.path().join("pdflatex.json");
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn test_parse_reads_known_keys_and_ignores_others() {
        let cfg = Config::parse(
            r#"{"pdflatex_path": "/opt/tex/pdflatex", "reports_dir": "/srv/reports",
                "compile_timeout_sec": 30, "colour": "blue"}"#,
            Path::new("pdflatex.json"),
            None,
        )
        .unwrap();
        assert_eq!(cfg.pdflatex_path, PathBuf::from("/opt/tex/pdflatex"));
        assert_eq!(cfg.reports_dir, PathBuf::from("/srv/reports"));
        assert_eq!(cfg.compile_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_falls_back_to_defaults() {
        let cfg = Config::parse("{}", Path::new("pdflatex.json"), None).unwrap();
        assert_eq!(cfg.pdflatex_path, PathBuf::from(DEFAULT_PDFLATEX_PATH));
        assert_eq!(cfg.reports_dir, default_reports_dir());
        assert!(cfg.compile_timeout.is_none());
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let cfg = Config::parse(
            r#"{"pdflatex_path": "/opt/tex/pdflatex"}"#,
            Path::new("pdflatex.json"),
            Some(OsString::from("/usr/bin/pdflatex")),
        )
        .unwrap();
        assert_eq!(cfg.pdflatex_path, PathBuf::from("/usr/bin/pdflatex"));

        let cfg = Config::parse("{}", Path::new("pdflatex.json"), Some(OsString::from("/usr/bin/pdflatex")))
            .unwrap();
        assert_eq!(cfg.pdflatex_path, PathBuf::from("/usr/bin/pdflatex"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let cfg = Config::parse(
            r#"{"pdflatex_path": "/opt/tex/pdflatex"}"#,
            Path::new("pdflatex.json"),
            Some(OsString::new()),
        )
        .unwrap();
        assert_eq!(cfg.pdflatex_path, PathBuf::from("/opt/tex/pdflatex"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let p = write_config(&dir, r#"{"reports_dir": "/srv/reports"}"#);
        let cfg = Config::load(&p).unwrap();
        assert_eq!(cfg.reports_dir, PathBuf::from("/srv/reports"));
    }

    #[test]
    fn test_load_if_present() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_if_present(dir.path().join("absent.json")).unwrap().is_none());

        let p = write_config(&dir, r#"{"reports_dir": "/srv/reports"}"#);
        let cfg = Config::load_if_present(&p).unwrap().unwrap();
        assert_eq!(cfg.reports_dir, PathBuf::from("/srv/reports"));

        let p = write_config(&dir, "not json");
        assert!(matches!(Config::load_if_present(&p), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_resolve_reports_dir_without_config_file() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_reports_dir(dir.path().join("absent.json")).unwrap();
        assert_eq!(resolved, default_reports_dir());

        let p = write_config(&dir, r#"{"reports_dir": "/srv/reports"}"#);
        assert_eq!(resolve_reports_dir(&p).unwrap(), PathBuf::from("/srv/reports"));

        let p = write_config(&dir, "{");
        assert!(resolve_reports_dir(&p).is_err());
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
    }

    #[test]
    fn test_load_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let p = write_config(&dir, "pdflatex_path = /usr/bin/pdflatex");
        assert!(matches!(Config::load(&p), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_default_config_path_file_name() {
        let p = default_config_path();
        assert!(p.ends_with("texreport/pdflatex.json"));
    }
}
