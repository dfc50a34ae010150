//! Variable substitution engine for templates

const PLACEHOLDER_OPEN: &str = "${";
const PLACEHOLDER_CLOSE: char = '}';

/// Substitute `${variable}` placeholders in template text.
///
/// Keys are matched literally. Every occurrence of a known placeholder is
/// replaced, unknown placeholders are kept verbatim, and inserted values are
/// never scanned again, so a value containing `${other}` stays as written.
pub fn substitute_variables<K, V, I>(content: &str, variables: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let variables: Vec<(K, V)> = variables.into_iter().collect();
    if variables.is_empty() {
        return content.to_string();
    }

    let lookup = |key: &str| {
        variables
            .iter()
            .find(|(k, _)| AsRef::<str>::as_ref(k) == key)
            .map(|(_, v)| AsRef::<str>::as_ref(v))
    };

    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let (before, placeholder) = rest.split_at(start);
        result.push_str(before);

        let key_start = PLACEHOLDER_OPEN.len();
        match placeholder[key_start..].find(PLACEHOLDER_CLOSE) {
            Some(len) => {
                let key = &placeholder[key_start..key_start + len];
                let end = key_start + len + PLACEHOLDER_CLOSE.len_utf8();
                match lookup(key) {
                    Some(value) => {
                        result.push_str(value);
                        rest = &placeholder[end..];
                    }
                    None => {
                        // Keep the marker and rescan right after `$`, so a
                        // nested `${` inside an unknown key is still found.
                        result.push('$');
                        rest = &placeholder[1..];
                    }
                }
            }
            None => {
                result.push_str(placeholder);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
