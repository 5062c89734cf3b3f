use crate::data::NOT_MODIFIED;

const METHOD_NOT_ALLOWED: u16 = 405;
const NOT_IMPLEMENTED: u16 = 501;

/// What a conditional fetch response means for the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// A full body follows and should replace the cached copy.
    Modified,
    /// The server confirmed the cached copy is current.
    NotModified,
    /// Neither; the cycle fails.
    Failed,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        NOT_MODIFIED => StatusClass::NotModified,
        200..=299 => StatusClass::Modified,
        _ => StatusClass::Failed,
    }
}

/// Whether a `HEAD` answer describes the resource itself.
///
/// A success does, and so do `405` and `501`, which only say the server
/// does not implement `HEAD`. Error pages and redirects say nothing about
/// the resource, so selection is retried next cycle.
pub fn is_head_usable(status: u16) -> bool {
    matches!(status, 200..=299 | METHOD_NOT_ALLOWED | NOT_IMPLEMENTED)
}
