//! Pure decisions for conditional retrieval.
//!
//! Nothing here touches the network or the filesystem.

mod date;
mod select;
mod status;

pub use date::http_date;
pub use select::select_scheme;
pub use status::{StatusClass, classify_status, is_head_usable};
