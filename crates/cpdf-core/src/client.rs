//! Async cpdf client
//!
//! One method per cpdf operation. Every call is independent: it builds an
//! [`Operation`], allocates an output path when the caller gave none, and
//! runs exactly one cpdf process through the configured [`CommandRunner`].

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CpdfConfig;
use crate::error::CpdfError;
use crate::operations::{parse_page_count, Operation, OperationOutput};
use crate::options::{BlackenOptions, BoxOptions};
use crate::runner::{CommandRunner, ProcessRunner};
use crate::temp::TempPathAllocator;

/// Client for the cpdf command-line tool
///
/// `Cpdf` holds no per-call state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Cpdf<R = ProcessRunner> {
    runner: R,
    temp: TempPathAllocator,
}

impl Cpdf<ProcessRunner> {
    /// Create a client that spawns the binary named in `config`
    pub fn new(config: &CpdfConfig) -> Self {
        Self::with_runner(config, ProcessRunner::new(config))
    }
}

impl<R: CommandRunner> Cpdf<R> {
    /// Create a client with a custom invocation boundary
    pub fn with_runner(config: &CpdfConfig, runner: R) -> Self {
        Self {
            runner,
            temp: TempPathAllocator::from_config(config),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Execute any [`Operation`]
    ///
    /// # Errors
    ///
    /// Fails with [`CpdfError::InvalidArgument`] before spawning if the
    /// request is malformed, and otherwise passes through whatever the
    /// runner reports.
    pub async fn execute(&self, op: &Operation) -> Result<OperationOutput, CpdfError> {
        if op.produces_file() {
            return self.run_to_file(op).await.map(OperationOutput::Path);
        }

        let stdout = self.run_to_text(op).await?;
        match op {
            Operation::CountPages { .. } => {
                parse_page_count(&stdout).map(OperationOutput::PageCount)
            }
            _ => Ok(OperationOutput::Text(stdout)),
        }
    }

    async fn run_to_file(&self, op: &Operation) -> Result<PathBuf, CpdfError> {
        op.validate()?;

        let output = match op.output() {
            Some(path) => path.to_path_buf(),
            None => {
                let path = self.temp.allocate();
                debug!(label = op.label(), path = %path.display(), "Allocated output path");
                path
            }
        };

        self.runner
            .run(op.label(), &op.command_line(Some(&output)))
            .await?;
        Ok(output)
    }

    async fn run_to_text(&self, op: &Operation) -> Result<String, CpdfError> {
        op.validate()?;
        self.runner.run(op.label(), &op.command_line(None)).await
    }

    /// Number of pages in `path`
    ///
    /// # Errors
    ///
    /// Returns [`CpdfError::InvalidPageCount`] when cpdf's output is not an
    /// integer.
    pub async fn count_pages(&self, path: impl AsRef<Path>) -> Result<u32, CpdfError> {
        let op = Operation::CountPages {
            path: path.as_ref().to_path_buf(),
        };
        let stdout = self.run_to_text(&op).await?;
        parse_page_count(&stdout)
    }

    /// Concatenate `paths` in order into one PDF
    ///
    /// Returns the output path: `output` if given, otherwise a fresh
    /// temporary path.
    pub async fn merge<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::Merge {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// Split `path` into files at `destination`; returns cpdf's raw output
    pub async fn split(
        &self,
        path: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<String, CpdfError> {
        let op = Operation::Split {
            path: path.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
        };
        self.run_to_text(&op).await
    }

    /// Apply arbitrary cpdf arguments to `template`
    ///
    /// Arguments are forwarded verbatim, one token each.
    pub async fn write<I, S>(
        &self,
        template: impl AsRef<Path>,
        args: I,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let op = Operation::Write {
            template: template.as_ref().to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// [`Cpdf::write`] with a whitespace-separated argument string
    ///
    /// No quoting is understood; use [`Cpdf::write`] for values that
    /// contain spaces.
    pub async fn write_raw(
        &self,
        template: impl AsRef<Path>,
        args: &str,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        self.write(template, args.split_whitespace(), output).await
    }

    /// Raw `-page-info` report, optionally limited to `range`
    pub async fn page_info(
        &self,
        path: impl AsRef<Path>,
        range: Option<&str>,
    ) -> Result<String, CpdfError> {
        let op = Operation::PageInfo {
            path: path.as_ref().to_path_buf(),
            range: range.map(str::to_string),
        };
        self.run_to_text(&op).await
    }

    /// Set the media box of the pages in `options.range` (all by default)
    pub async fn media_box(
        &self,
        path: impl AsRef<Path>,
        options: &BoxOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::MediaBox {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// Set the crop box of the pages in `options.range` (all by default)
    pub async fn crop_box(
        &self,
        path: impl AsRef<Path>,
        options: &BoxOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::CropBox {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// Alias for [`Cpdf::crop_box`]
    pub async fn crop(
        &self,
        path: impl AsRef<Path>,
        options: &BoxOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        self.crop_box(path, options, output).await
    }

    /// Paint all text black, or `options.color`
    pub async fn blacktext(
        &self,
        path: impl AsRef<Path>,
        options: &BlackenOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::Blacktext {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// Paint all lines black, or `options.color`
    pub async fn blacklines(
        &self,
        path: impl AsRef<Path>,
        options: &BlackenOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::Blacklines {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }

    /// Paint all fills black, or `options.color`
    pub async fn blackfills(
        &self,
        path: impl AsRef<Path>,
        options: &BlackenOptions,
        output: Option<&Path>,
    ) -> Result<PathBuf, CpdfError> {
        let op = Operation::Blackfills {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
            output: output.map(Path::to_path_buf),
        };
        self.run_to_file(&op).await
    }
}
