use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliErr {
    #[error("failed to read file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid json file")]
    InvalidJsonFile,
    #[error(transparent)]
    Json(#[from] json_tree::Error),
}
