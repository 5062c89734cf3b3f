use std::time::SystemTime;

use super::http_date;
use crate::data::{FreshnessScheme, ResponseMeta};

/// Pick the scheme a probe response supports.
///
/// `Last-Modified` wins over `ETag`; with neither the resource is always
/// re-fetched. A modification-time scheme starts from `baseline` (the
/// modification time of an already cached copy), so an unchanged remote
/// answers the first conditional request with `304`.
pub fn select_scheme(meta: &ResponseMeta, baseline: Option<SystemTime>) -> FreshnessScheme {
    if meta.last_modified.is_some() {
        FreshnessScheme::ModTime(baseline.map(http_date))
    } else if meta.etag.is_some() {
        FreshnessScheme::EntityTag(None)
    } else {
        FreshnessScheme::Unconditional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    const DATE: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

    #[test]
    fn test_last_modified_takes_precedence() {
        let meta = ResponseMeta::default().with_etag("\"a\"").with_last_modified(DATE);
        assert_eq!(select_scheme(&meta, None), FreshnessScheme::ModTime(None));
    }

    #[test]
    fn test_mod_time_seeded_from_baseline() {
        let meta = ResponseMeta::default().with_last_modified(DATE);
        let baseline = UNIX_EPOCH + Duration::from_secs(1_445_412_480);

        assert_eq!(
            select_scheme(&meta, Some(baseline)),
            FreshnessScheme::ModTime(Some(DATE.to_string()))
        );
    }

    #[test]
    fn test_entity_tag_ignores_baseline() {
        let meta = ResponseMeta::default().with_etag("\"a\"");
        assert_eq!(
            select_scheme(&meta, Some(UNIX_EPOCH)),
            FreshnessScheme::EntityTag(None)
        );
    }

    #[test]
    fn test_no_metadata_is_unconditional() {
        assert_eq!(
            select_scheme(&ResponseMeta::default(), Some(UNIX_EPOCH)),
            FreshnessScheme::Unconditional
        );
    }
}
