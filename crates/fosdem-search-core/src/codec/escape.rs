//! Component escaping for the query-string codec.

use std::borrow::Cow;

/// Characters that delimit query-string components and must not appear raw in a value.
const VALUE_RESERVED: &[char] = &['%', '&', '=', '#', '+'];

/// Keys additionally reserve the bracket path syntax.
const KEY_RESERVED: &[char] = &['%', '&', '=', '#', '+', '[', ']'];

/// Full component encoding for the free-text `query` value.
///
/// Everything except `A-Z a-z 0-9 - _ . ~` is percent-encoded.
pub fn encode_query(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Escapes only the query-string delimiters in a non-`query` value.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    escape_reserved(value, VALUE_RESERVED)
}

/// Escapes the delimiters and bracket syntax in a key segment.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    escape_reserved(key, KEY_RESERVED)
}

fn escape_reserved<'a>(input: &'a str, reserved: &[char]) -> Cow<'a, str> {
    if !input.contains(reserved) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        if reserved.contains(&c) {
            // All reserved characters are ASCII.
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Decodes one form component: `+` becomes a space, then percent escapes are
/// decoded. Invalid escapes stay literal; invalid UTF-8 is replaced lossily.
pub fn decode_component(raw: &str) -> String {
    if !raw.contains(['+', '%']) {
        return raw.to_string();
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
