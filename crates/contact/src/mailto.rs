use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn mailto_uri(recipient: &str, subject: &str, body: Option<&str>) -> String {
    let mut uri = format!("mailto:{recipient}?subject={}", encode_component(subject));
    if let Some(body) = body {
        uri.push_str("&body=");
        uri.push_str(&encode_component(body));
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_uri_component() {
        assert_eq!(
            encode_component("Contact from Resume Website - Zed Li"),
            "Contact%20from%20Resume%20Website%20-%20Zed%20Li"
        );
        assert_eq!(encode_component("a&b=c\n"), "a%26b%3Dc%0A");
        assert_eq!(encode_component("it's (ok)!*~._"), "it's%20(ok)!*~._");
        assert_eq!(encode_component("你好"), "%E4%BD%A0%E5%A5%BD");
    }

    #[test]
    fn builds_subject_only_link() {
        assert_eq!(
            mailto_uri("me@example.com", "Hi there", None),
            "mailto:me@example.com?subject=Hi%20there"
        );
    }

    #[test]
    fn appends_encoded_body() {
        let uri = mailto_uri("me@example.com", "Hi", Some("Name: Ada\nEmail: a@b.co"));
        assert_eq!(
            uri,
            "mailto:me@example.com?subject=Hi&body=Name%3A%20Ada%0AEmail%3A%20a%40b.co"
        );
    }
}
