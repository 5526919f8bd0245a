//! 驱动层错误类型

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::input::InputError;

/// 运行仿真时可能出现的错误
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to serialize snapshots: {0}")]
    Json(#[from] serde_json::Error),
}
