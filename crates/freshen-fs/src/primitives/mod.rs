pub mod replace;
pub mod snapshot;
pub mod stage;

pub use replace::{CommitMethod, replace_file};
pub use snapshot::{Snapshot, read_snapshot};
pub use stage::{StagedFile, stage};
