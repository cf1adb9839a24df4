//! pgfplots script generation for time series.
//!
//! A [`PlotSpec`] renders to an `axis` environment holding a single `\addplot coordinates`
//! series with date-typed x values, ready to be `\input` from a report template.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{
    error::{Error, Result},
    utils::{format_timestamp, join_lines, string_to_lines},
};

/// `(unix timestamp in seconds, value)`
pub type Point = (i64, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub name: String,
    pub axis_options: String,
    pub plot_options: String,
    pub points: Vec<Point>,
}

impl PlotSpec {
    pub fn new(
        name: impl Into<String>,
        axis_options: impl Into<String>,
        plot_options: impl Into<String>,
        points: Vec<Point>,
    ) -> Self {
        Self {
            name: name.into(),
            axis_options: axis_options.into(),
            plot_options: plot_options.into(),
            points,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("axis_options", &self.axis_options),
            ("plot_options", &self.plot_options),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_argument(format!(
                    "{param} parameter is mandatory"
                )));
            }
        }
        Ok(())
    }

    /// File name the script is written under.
    pub fn file_name(&self) -> String {
        format!("pgfplot-{}.tex", self.name)
    }

    /// Render the script text, one trimmed line per template line.
    pub fn render(&self) -> Result<String> {
        self.validate()?;

        let coordinates = self
            .points
            .iter()
            .map(|&(x, y)| -> Result<String> {
                let date = format_timestamp(x).ok_or_else(|| {
                    Error::invalid_argument(format!("timestamp out of range: {x}"))
                })?;
                Ok(format!("({date}, {y:.6})"))
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n");

        let script = format!(
            r"
            \begin{{axis}}[
              date coordinates in=x,
              grid=major,
              {axis_options}
            ]
            \addplot [{plot_options}] coordinates {{
            {coordinates}
            }};
            \end{{axis}}
            ",
            axis_options = self.axis_options,
            plot_options = self.plot_options,
        );

        Ok(join_lines(&string_to_lines(&script)))
    }
}

/// Write the script for `spec` to `<output_dir>/pgfplot-<name>.tex` and return that path.
///
/// The directory must already exist; write failures surface as [`Error::Io`].
pub fn pgfplot(spec: &PlotSpec, output_dir: &Path) -> Result<PathBuf> {
    let script = spec.render()?;
    let path = output_dir.join(spec.file_name());
    fs::write(&path, script)?;
    tracing::info!(path = %path.display(), points = spec.points.len(), "Wrote pgfplot script");
    Ok(path)
}

/// Decode points from JSON. The value must be an array of `[timestamp, value]` pairs.
pub fn parse_points(value: &Value) -> Result<Vec<Point>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::invalid_argument("points parameter type mismatch"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Point> {
            let pair = item.as_array().filter(|p| p.len() == 2).ok_or_else(|| {
                Error::invalid_argument(format!("point #{i} is not a [timestamp, value] pair"))
            })?;
            let ts = pair[0]
                .as_i64()
                .or_else(|| pair[0].as_f64().map(|f| f.floor() as i64))
                .ok_or_else(|| Error::invalid_argument(format!("point #{i}: bad timestamp")))?;
            let v = pair[1]
                .as_f64()
                .ok_or_else(|| Error::invalid_argument(format!("point #{i}: bad value")))?;
            Ok((ts, v))
        })
        .collect()
}
