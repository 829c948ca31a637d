//! # Shortcodes
//!
//! Expands `[name]` tags in page content. Attributes after the name
//! (`[name foo="bar"]`) are accepted and ignored; `[[name]]` renders the
//! literal `[name]`; tags the renderer does not know are left untouched.

/// Tag that renders the payment button
pub const PAYMENT_SHORTCODE: &str = "hoodpay_payment";

/// Replace every known shortcode in `content` with `render(name)`.
pub fn expand_shortcodes<F>(content: &str, render: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail.find(']') else {
            out.push_str(tail);
            return out;
        };

        // `[[name]]` escapes a tag
        if tail.starts_with("[[") {
            if let Some(end) = tail.find("]]") {
                let inner = &tail[2..end];
                if parse_tag(inner).is_some() {
                    out.push('[');
                    out.push_str(inner);
                    out.push(']');
                    rest = &tail[end + 2..];
                    continue;
                }
            }
        }

        let inner = &tail[1..close];
        match parse_tag(inner).and_then(|name| render(name)) {
            Some(html) => out.push_str(&html),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Tag name, if `inner` looks like `name` or `name attrs...`
fn parse_tag(inner: &str) -> Option<&str> {
    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = &inner[..name_end];

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(name)
}
