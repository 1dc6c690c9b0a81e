use std::{io, path::PathBuf};

use xwfill_core::StructureError;

/// Failures that stop the command before or after solving.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("invalid structure in {}: {source}", path.display())]
    Structure {
        path: PathBuf,
        source: StructureError,
    },
    #[display("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
