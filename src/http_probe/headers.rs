use reqwest::header::HeaderMap;

/// Splits a space-delimited list such as `"Server X-Powered-By"` into names.
pub fn parse_header_names(names: &str) -> Vec<String> {
    names.split_whitespace().map(str::to_string).collect()
}

/// Picks the values of `names` out of `headers`, in the order of `names`.
///
/// Lookup is case-insensitive. Headers that are missing (or carry an empty
/// value) are skipped rather than represented by an empty slot. When a
/// header repeats, the first value wins.
pub fn select_headers<S: AsRef<str>>(headers: &HeaderMap, names: &[S]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| headers.get(name.as_ref()))
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|value| !value.is_empty())
        .collect()
}
