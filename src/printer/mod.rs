//! Terminal output for command results.

use std::path::Path;

use owo_colors::OwoColorize;

use texreport::Error;

pub struct ReportPrinter {
    pub color: bool,
}

impl ReportPrinter {
    pub fn path(&self, path: &Path) {
        if self.color {
            println!("{}", path.display().green());
        } else {
            println!("{}", path.display());
        }
    }

    /// Describe `err` on stderr, listing extracted LaTeX errors one per line.
    pub fn failure(&self, err: &Error) {
        if self.color {
            eprintln!("{} {}", "error:".red().bold(), err);
        } else {
            eprintln!("error: {}", err);
        }
        for line in err.latex_errors() {
            if self.color {
                eprintln!("  {} {}", "!".red(), line.yellow());
            } else {
                eprintln!("  ! {}", line);
            }
        }
    }
}
