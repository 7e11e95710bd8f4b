//! Async wrapper around the cpdf command-line tool
//!
//! This crate builds cpdf argument lists for common PDF operations and runs
//! the external binary once per call. All PDF processing happens inside
//! cpdf; this layer only shapes arguments, allocates output paths and maps
//! process results.
//!
//! - [`Cpdf`]: one async method per operation (`count_pages`, `merge`,
//!   `split`, `write`, `page_info`, `media_box`, `crop_box`/`crop`,
//!   `blacktext`, `blacklines`, `blackfills`)
//! - [`Operation`]: the same requests as serializable data, run with
//!   [`Cpdf::execute`]
//! - [`CommandRunner`]: the process boundary, swappable for tests
//!
//! # Example
//!
//! ```no_run
//! use cpdf_core::{BoxOptions, Cpdf, CpdfConfig};
//!
//! # async fn example() -> Result<(), cpdf_core::CpdfError> {
//! let cpdf = Cpdf::new(&CpdfConfig::from_env());
//!
//! let pages = cpdf.count_pages("report.pdf").await?;
//! let merged = cpdf.merge(&["cover.pdf", "report.pdf"], None).await?;
//! let boxed = cpdf
//!     .media_box(&merged, &BoxOptions::new([0.0, 0.0, 595.0, 842.0]), None)
//!     .await?;
//! println!("{} pages, written to {}", pages, boxed.display());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod operations;
pub mod options;
pub mod runner;
pub mod temp;

pub use client::Cpdf;
pub use command::CommandLine;
pub use config::CpdfConfig;
pub use error::CpdfError;
pub use operations::{parse_page_count, Operation, OperationOutput};
pub use options::{BlackenOptions, BoxOptions, PageBox};
pub use runner::{CommandRunner, ProcessRunner};
pub use temp::TempPathAllocator;
