//! `document.cookie` parsing.

/// Value of cookie `name` from a `document.cookie` style string, URL-decoded.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_value(value))
}

/// Percent-decoded value, or the raw value when it is not valid UTF-8 once
/// decoded.
fn decode_value(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            tracing::debug!(error = %err, "cookie value kept undecoded");
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        let cookies = "sessionid=abc; csrftoken=Xy12; theme=dark";
        assert_eq!(read_cookie(cookies, "csrftoken").as_deref(), Some("Xy12"));
        assert_eq!(read_cookie(cookies, "missing"), None);
    }

    #[test]
    fn does_not_match_name_suffix() {
        assert_eq!(read_cookie("xcsrftoken=1; csrftoken=2", "csrftoken").as_deref(), Some("2"));
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(read_cookie("name=a%20b%2Cc", "name").as_deref(), Some("a b,c"));
        assert_eq!(read_cookie("name=100%", "name").as_deref(), Some("100%"));
    }

    #[test]
    fn malformed_escapes_stay_literal() {
        assert_eq!(read_cookie("name=%+1x", "name").as_deref(), Some("%+1x"));
        assert_eq!(read_cookie("name=%-fz", "name").as_deref(), Some("%-fz"));
        assert_eq!(read_cookie("name=%zz", "name").as_deref(), Some("%zz"));
    }

    #[test]
    fn invalid_utf8_falls_back_to_raw_value() {
        assert_eq!(read_cookie("name=%FF%FE", "name").as_deref(), Some("%FF%FE"));
    }

    #[test]
    fn empty_cookie_string() {
        assert_eq!(read_cookie("", "csrftoken"), None);
    }
}
