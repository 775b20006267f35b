// crates/instdir-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the directory.
///
/// These counts reflect the materialized in-memory dataset after any
/// country filtering that was applied at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub institutions: usize,
    pub classifications: usize,
    pub metrics: usize,
}
