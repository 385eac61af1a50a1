pub mod writer;

pub use writer::{SnapshotError, SnapshotWriter};
