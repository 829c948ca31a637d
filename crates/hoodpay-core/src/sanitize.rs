//! # Text Sanitising
//!
//! Plain-text cleanup applied to settings form input before storage,
//! plus HTML escaping used by every rendered page.

/// Clean a single-line text field.
///
/// Strips HTML tags (and the bodies of `script`/`style` elements), removes
/// percent-encoded octets, collapses runs of whitespace including line breaks
/// to a single space, and trims the result.
pub fn sanitize_text_field(input: &str) -> String {
    let without_tags = strip_tags(input);
    let collapsed = collapse_whitespace(&without_tags);
    let without_octets = strip_percent_octets(&collapsed);
    collapse_whitespace(&without_octets)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn starts_tag(next: Option<char>) -> bool {
    matches!(next, Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?')
}

fn strip_tags(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };

        if c == '<' && starts_tag(chars.next()) {
            // Drop the whole element for script/style, content included.
            let lower_rest = &lower[i..];
            let raw_element = ["script", "style"]
                .into_iter()
                .find(|name| lower_rest[1..].starts_with(name));
            if let Some(name) = raw_element {
                let close = format!("</{}", name);
                match lower_rest.find(&close) {
                    Some(pos) => {
                        let after_close = i + pos + close.len();
                        i = match input[after_close..].find('>') {
                            Some(gt) => after_close + gt + 1,
                            None => input.len(),
                        };
                    }
                    None => i = input.len(),
                }
                continue;
            }

            match rest.find('>') {
                Some(gt) => {
                    i += gt + 1;
                    continue;
                }
                None => {
                    // Unterminated tag swallows the remainder.
                    break;
                }
            }
        }

        out.push(c);
        i += c.len_utf8();
    }

    out
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_percent_octets(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = strip_percent_octets_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_percent_octets_once(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            i += 3;
            continue;
        }
        let c = input[i..].chars().next().unwrap_or('\0');
        out.push(c);
        i += c.len_utf8();
    }

    out
}
