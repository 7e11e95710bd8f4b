//! cpdf operations and their argument construction
//!
//! Each [`Operation`] knows its diagnostic label and how to lay out its
//! cpdf arguments. Argument layout follows the cpdf manual, e.g.
//! `cpdf -mediabox "<x> <y> <w> <h>" in.pdf [<range>] -o out.pdf`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::CommandLine;
use crate::error::CpdfError;
use crate::options::{BlackenOptions, BoxOptions};

/// A single cpdf request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    CountPages {
        path: PathBuf,
    },
    Merge {
        paths: Vec<PathBuf>,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    Split {
        path: PathBuf,
        destination: PathBuf,
    },
    /// Pass-through arguments applied to a template file, unvalidated
    Write {
        template: PathBuf,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    PageInfo {
        path: PathBuf,
        #[serde(default)]
        range: Option<String>,
    },
    MediaBox {
        path: PathBuf,
        options: BoxOptions,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    CropBox {
        path: PathBuf,
        options: BoxOptions,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    Blacktext {
        path: PathBuf,
        #[serde(default)]
        options: BlackenOptions,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    Blacklines {
        path: PathBuf,
        #[serde(default)]
        options: BlackenOptions,
        #[serde(default)]
        output: Option<PathBuf>,
    },
    Blackfills {
        path: PathBuf,
        #[serde(default)]
        options: BlackenOptions,
        #[serde(default)]
        output: Option<PathBuf>,
    },
}

/// Result of executing an [`Operation`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OperationOutput {
    PageCount(u32),
    /// Path of the PDF written by cpdf
    Path(PathBuf),
    /// Raw cpdf stdout
    Text(String),
}

impl Operation {
    /// Human-readable name used in logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CountPages { .. } => "Counting pages",
            Operation::Merge { .. } => "Merging",
            Operation::Split { .. } => "Splitting",
            Operation::Write { .. } => "Writing file",
            Operation::PageInfo { .. } => "PageInfo",
            Operation::MediaBox { .. } => "Modify MediaBox",
            Operation::CropBox { .. } => "Modify CropBox",
            Operation::Blacktext { .. } => "Blacktext",
            Operation::Blacklines { .. } => "Blacklines",
            Operation::Blackfills { .. } => "Blackfills",
        }
    }

    /// Whether the operation writes a new PDF to an output path
    pub fn produces_file(&self) -> bool {
        !matches!(
            self,
            Operation::CountPages { .. } | Operation::Split { .. } | Operation::PageInfo { .. }
        )
    }

    /// Caller-supplied output path, if any
    pub fn output(&self) -> Option<&Path> {
        match self {
            Operation::Merge { output, .. }
            | Operation::Write { output, .. }
            | Operation::MediaBox { output, .. }
            | Operation::CropBox { output, .. }
            | Operation::Blacktext { output, .. }
            | Operation::Blacklines { output, .. }
            | Operation::Blackfills { output, .. } => output.as_deref(),
            Operation::CountPages { .. } | Operation::Split { .. } | Operation::PageInfo { .. } => {
                None
            }
        }
    }

    /// Reject requests that cannot form a command at all
    pub fn validate(&self) -> Result<(), CpdfError> {
        match self {
            Operation::Merge { paths, .. } if paths.is_empty() => Err(
                CpdfError::InvalidArgument("merge requires at least one input file".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Lay out the cpdf arguments
    ///
    /// `output` is the resolved output path for operations that produce a
    /// file and is ignored by the others.
    pub fn command_line(&self, output: Option<&Path>) -> CommandLine {
        let cmd = match self {
            Operation::CountPages { path } => CommandLine::new().arg("-pages").path(path),
            Operation::Merge { paths, .. } => paths
                .iter()
                .fold(CommandLine::new(), |cmd, p| cmd.path(p)),
            Operation::Split { path, destination } => {
                CommandLine::new().arg("-split").path(path).output(destination)
            }
            Operation::Write { template, args, .. } => {
                CommandLine::new().path(template).args(args.iter().cloned())
            }
            Operation::PageInfo { path, range } => CommandLine::new()
                .arg("-page-info")
                .path(path)
                .arg_if_present(range.as_deref()),
            Operation::MediaBox { path, options, .. } => box_command("-mediabox", path, options),
            Operation::CropBox { path, options, .. } => box_command("-cropbox", path, options),
            Operation::Blacktext { path, options, .. } => {
                blacken_command("-blacktext", path, options)
            }
            Operation::Blacklines { path, options, .. } => {
                blacken_command("-blacklines", path, options)
            }
            Operation::Blackfills { path, options, .. } => {
                blacken_command("-blackfills", path, options)
            }
        };

        match output {
            Some(out) if self.produces_file() => cmd.output(out),
            _ => cmd,
        }
    }
}

fn box_command(flag: &str, path: &Path, options: &BoxOptions) -> CommandLine {
    CommandLine::new()
        .arg(flag)
        .arg(options.new_box.to_string())
        .path(path)
        .arg_if_present(options.range.as_deref())
}

fn blacken_command(flag: &str, path: &Path, options: &BlackenOptions) -> CommandLine {
    let cmd = CommandLine::new().arg(flag);
    let cmd = match options.color.as_deref() {
        Some(color) if !color.is_empty() => cmd.arg("-color").arg(color),
        _ => cmd,
    };
    cmd.path(path)
}

/// Parse `-pages` output such as `"5\n"`
pub fn parse_page_count(stdout: &str) -> Result<u32, CpdfError> {
    stdout
        .trim()
        .parse()
        .map_err(|_| CpdfError::InvalidPageCount {
            output: stdout.to_string(),
        })
}
