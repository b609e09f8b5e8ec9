mod collect;
mod config;
mod convert;
mod error;
mod export;
mod links;
mod resolve;
mod vault;

pub use crate::collect::{Collection, collect_notes};
pub use crate::config::{ExportConfig, TargetKind};
pub use crate::convert::Converter;
pub use crate::error::{Error, Result};
pub use crate::export::{ExportReport, Exporter, SkippedFile};
pub use crate::links::{Reference, extract_references};
pub use crate::resolve::Resolver;
pub use crate::vault::Vault;
