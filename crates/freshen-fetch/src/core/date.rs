use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Format `time` as an HTTP-date (IMF-fixdate), e.g.
/// `Wed, 21 Oct 2015 07:28:00 GMT`.
///
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use freshen_fetch::http_date;
///
/// let time = UNIX_EPOCH + Duration::from_secs(1_445_412_480);
/// assert_eq!(http_date(time), "Wed, 21 Oct 2015 07:28:00 GMT");
/// ```
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_epoch() {
        assert_eq!(http_date(UNIX_EPOCH), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_drops_subsecond_precision() {
        let time = UNIX_EPOCH + Duration::from_millis(1_445_412_480_999);
        assert_eq!(http_date(time), "Wed, 21 Oct 2015 07:28:00 GMT");
    }
}
