//! Post body rendering.
//!
//! Turns the plain text a user typed into HTML for the detail view. The
//! output contains no markup other than `<p>`, `<br>`, `<strong>`, `<em>` and
//! `<code>`; every character of the input is HTML-escaped, so user text can
//! never produce tags or attributes of its own.
//!
//! Supported formatting:
//! - blank lines separate paragraphs, single newlines become `<br>`
//! - `**strong**`, `*emphasis*`, `` `code` ``

/// Render a post body to sanitized HTML.
///
/// This is a pure function of `body`: the same input always yields the same
/// output.
pub fn render_body(body: &str) -> String {
    let normalized = body.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let mut out = String::with_capacity(normalized.len() + 16);
    for (i, lines) in paragraphs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("<p>");
        for (j, line) in lines.iter().enumerate() {
            if j > 0 {
                out.push_str("<br>\n");
            }
            render_inline(line, &mut out);
        }
        out.push_str("</p>");
    }
    out
}

/// Render inline spans. Delimiters without a closing partner are kept as text.
fn render_inline(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`').filter(|&end| end > 0) {
                out.push_str("<code>");
                escape_into(&after[..end], out);
                out.push_str("</code>");
                rest = &after[end + 1..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**").filter(|&end| end > 0) {
                out.push_str("<strong>");
                render_inline(&after[..end], out);
                out.push_str("</strong>");
                rest = &after[end + 2..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*').filter(|&end| end > 0) {
                out.push_str("<em>");
                render_inline(&after[..end], out);
                out.push_str("</em>");
                rest = &after[end + 1..];
                continue;
            }
        }

        escape_char(c, out);
        rest = &rest[c.len_utf8()..];
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        escape_char(c, out);
    }
}

fn escape_char(c: char, out: &mut String) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        _ => out.push(c),
    }
}
