/// An outgoing request: the target locator plus extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url:     String,
    headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url:     url.into(),
            headers: Vec::new(),
        }
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Set `name` to `value`, replacing any earlier value for the same
    /// header name (compared case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Freshness-related metadata read from a response.
///
/// Empty header values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub etag:          Option<String>,
    pub last_modified: Option<String>,
}

impl ResponseMeta {
    pub fn new(etag: Option<String>, last_modified: Option<String>) -> Self {
        Self {
            etag:          etag.filter(|v| !v.is_empty()),
            last_modified: last_modified.filter(|v| !v.is_empty()),
        }
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into()).filter(|v| !v.is_empty());
        self
    }

    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = Some(last_modified.into()).filter(|v| !v.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut request = Request::new("http://example.com/feed");
        request.set_header("If-None-Match", "\"a\"");
        request.set_header("if-none-match", "\"b\"");

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.get_header("IF-NONE-MATCH"), Some("\"b\""));
    }

    #[test]
    fn test_meta_ignores_empty_values() {
        let meta = ResponseMeta::new(Some(String::new()), Some("Wed, 21 Oct 2015 07:28:00 GMT".into()));
        assert_eq!(meta.etag, None);
        assert!(meta.last_modified.is_some());
    }
}
