use crate::error::{HttpidError, Result};

const DEFAULT_SCHEME: &str = "http://";

/// A single URL to probe, tagged with its position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: usize,
    pub url: String,
}

impl Endpoint {
    /// Normalizes every raw URL and assigns ids `0..n` in input order.
    ///
    /// Fails on the first URL that cannot be normalized, before anything is
    /// dispatched.
    pub fn batch<S: AsRef<str>>(raw_urls: &[S]) -> Result<Vec<Endpoint>> {
        if raw_urls.is_empty() {
            return Err(HttpidError::NoUrls);
        }

        raw_urls
            .iter()
            .enumerate()
            .map(|(id, raw)| {
                Ok(Endpoint {
                    id,
                    url: normalize_url(raw.as_ref())?,
                })
            })
            .collect()
    }
}

/// Prepends `http://` unless the URL already starts with `http`.
///
/// The check is a plain, case-sensitive prefix match, so `https://` passes
/// through untouched. Inputs shorter than 4 characters are rejected.
pub fn normalize_url(raw: &str) -> Result<String> {
    if raw.chars().count() < 4 {
        return Err(HttpidError::InvalidUrl {
            url: raw.to_string(),
        });
    }

    if raw.starts_with("http") {
        Ok(raw.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
        assert_eq!(
            normalize_url("www.example.com/path?q=1").unwrap(),
            "http://www.example.com/path?q=1"
        );
    }

    #[test]
    fn test_normalize_keeps_prefixed_urls() {
        for url in ["http://example.org", "https://example.org", "httpbin.org"] {
            let once = normalize_url(url).unwrap();
            assert_eq!(once, url);
            assert_eq!(normalize_url(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(
            normalize_url("HTTP://example.com").unwrap(),
            "http://HTTP://example.com"
        );
    }

    #[test]
    fn test_normalize_rejects_short_input() {
        for url in ["", "a", "abc", "é.f"] {
            assert!(matches!(
                normalize_url(url),
                Err(HttpidError::InvalidUrl { .. })
            ));
        }
        assert_eq!(normalize_url("a.io").unwrap(), "http://a.io");
    }

    #[test]
    fn test_batch_assigns_dense_ids() {
        let endpoints = Endpoint::batch(&["example.com", "http://example.org"]).unwrap();
        assert_eq!(
            endpoints,
            vec![
                Endpoint {
                    id: 0,
                    url: "http://example.com".to_string()
                },
                Endpoint {
                    id: 1,
                    url: "http://example.org".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_batch_rejects_empty_and_invalid() {
        let empty: [&str; 0] = [];
        assert!(matches!(Endpoint::batch(&empty), Err(HttpidError::NoUrls)));
        assert!(matches!(
            Endpoint::batch(&["example.com", "x"]),
            Err(HttpidError::InvalidUrl { url }) if url == "x"
        ));
    }
}
