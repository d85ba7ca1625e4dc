//! `location.search` helpers with `URLSearchParams` semantics.

use url::form_urlencoded;

/// Name of the query parameter that mirrors the selected dataset.
pub const DATA_PARAM: &str = "data";

fn strip(search: &str) -> &str {
    search.strip_prefix('?').unwrap_or(search)
}

/// First value of `key` in `search` (with or without the leading `?`).
pub fn read_param(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(strip(search).as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// `search` with `key` set to `value`: the first occurrence is replaced in
/// place, later duplicates dropped, and the pair appended if absent.
/// Returns the new search string including the leading `?`.
pub fn set_param(search: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (k, v) in form_urlencoded::parse(strip(search).as_bytes()) {
        if k == key {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in &pairs {
        serializer.append_pair(k, v);
    }
    format!("?{}", serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sets_param_on_empty_search() {
        assert_eq!(set_param("", DATA_PARAM, "movies"), "?data=movies");
    }

    #[test]
    fn replaces_existing_value_and_keeps_other_params() {
        assert_eq!(
            set_param("?theme=dark&data=games&x=1", DATA_PARAM, "ksPledges"),
            "?theme=dark&data=ksPledges&x=1"
        );
        assert_eq!(set_param("?data=a&data=b", DATA_PARAM, "movies"), "?data=movies");
    }

    #[test]
    fn reads_params_with_or_without_question_mark() {
        assert_eq!(read_param("?data=movies", DATA_PARAM).as_deref(), Some("movies"));
        assert_eq!(read_param("data=games&x=1", DATA_PARAM).as_deref(), Some("games"));
        assert_eq!(read_param("?x=1", DATA_PARAM), None);
        assert_eq!(read_param("?q=a%20b", "q").as_deref(), Some("a b"));
    }
}
