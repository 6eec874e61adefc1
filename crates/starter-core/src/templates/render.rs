//! Variable substitution for rendered template files
//!
//! `<%= name %>` inserts the HTML-escaped value, `<%- name %>` inserts it as-is.

use crate::error::RenderError;
use std::collections::BTreeMap;

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

fn escape_html(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn line_of(template: &str, offset: usize) -> usize {
    template[..offset].matches('\n').count() + 1
}

/// Close-tag marker that slurps what follows the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trim {
    /// `-%>` drops one following newline
    Newline,
    /// `_%>` drops following spaces and tabs
    Whitespace,
}

fn split_trim(body: &str) -> (&str, Option<Trim>) {
    if body.len() > 1 {
        if let Some(stripped) = body.strip_suffix('-') {
            return (stripped, Some(Trim::Newline));
        }
        if let Some(stripped) = body.strip_suffix('_') {
            return (stripped, Some(Trim::Whitespace));
        }
    }
    (body, None)
}

fn slurp(rest: &str, trim: Trim) -> &str {
    match trim {
        Trim::Newline => rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest),
        Trim::Whitespace => rest.trim_start_matches([' ', '\t']),
    }
}

/// Render `template` with the given variables
///
/// `<%%` produces a literal `<%`. A close tag written `-%>` or `_%>` trims
/// the text after it.
pub fn render(template: &str, context: &BTreeMap<String, String>) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let tag_offset = consumed + start;
        let after_open = &rest[start + OPEN.len()..];

        if after_open.starts_with('%') {
            out.push_str(OPEN);
            let advance = start + OPEN.len() + 1;
            consumed += advance;
            rest = &rest[advance..];
            continue;
        }

        let Some(end) = after_open.find(CLOSE) else {
            return Err(RenderError::Unterminated {
                line: line_of(template, tag_offset),
            });
        };

        let raw_body = &after_open[..end];
        let (body, trim) = split_trim(raw_body);
        let (escape, expr, trim) = match body.chars().next() {
            Some('=') => (true, body[1..].trim(), trim),
            Some('-') => (false, body[1..].trim(), trim),
            // anything else is not a substitution; keep it verbatim
            _ => {
                out.push_str(OPEN);
                out.push_str(raw_body);
                out.push_str(CLOSE);
                (false, "", None)
            }
        };

        if !expr.is_empty() {
            let value = context.get(expr).ok_or_else(|| RenderError::UnknownVariable {
                name: expr.to_string(),
                line: line_of(template, tag_offset),
            })?;
            if escape {
                escape_html(value, &mut out);
            } else {
                out.push_str(value);
            }
        }

        let advance = start + OPEN.len() + end + CLOSE.len();
        consumed += advance;
        rest = &rest[advance..];

        if let Some(trim) = trim {
            let remaining = slurp(rest, trim);
            consumed += rest.len() - remaining.len();
            rest = remaining;
        }
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("appname".to_string(), "testapp".to_string()),
            ("description".to_string(), "Tom & \"Jerry\"".to_string()),
        ])
    }

    #[test]
    fn test_substitutes_values() {
        let out = render("name: <%= appname %>\n", &ctx()).unwrap();
        assert_eq!(out, "name: testapp\n");
    }

    #[test]
    fn test_escaped_and_raw_output() {
        assert_eq!(
            render("<%= description %>", &ctx()).unwrap(),
            "Tom &amp; &#34;Jerry&#34;"
        );
        assert_eq!(
            render("<%- description %>", &ctx()).unwrap(),
            "Tom & \"Jerry\""
        );
    }

    #[test]
    fn test_text_without_tags_is_unchanged() {
        let text = "module.exports = { port: 3000 };\n";
        assert_eq!(render(text, &ctx()).unwrap(), text);
    }

    #[test]
    fn test_unknown_variable() {
        let err = render("a\nb <%= missing %>", &ctx()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownVariable {
                name: "missing".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_unterminated_tag() {
        let err = render("x\ny\n<%= appname", &ctx()).unwrap_err();
        assert_eq!(err, RenderError::Unterminated { line: 3 });
    }

    #[test]
    fn test_non_substitution_tags_pass_through() {
        let out = render("<% if (x) { %>y<%= appname %>", &ctx()).unwrap();
        assert_eq!(out, "<% if (x) { %>ytestapp");
    }

    #[test]
    fn test_literal_open_tag() {
        let out = render("<%% if (x) { %> <%= appname %>", &ctx()).unwrap();
        assert_eq!(out, "<% if (x) { %> testapp");
    }

    #[test]
    fn test_trim_markers() {
        assert_eq!(
            render("name: <%= appname -%>\nnext", &ctx()).unwrap(),
            "name: testappnext"
        );
        assert_eq!(
            render("<%- appname _%>  \t!\n", &ctx()).unwrap(),
            "testapp!\n"
        );
        assert_eq!(render("<%= appname -%>", &ctx()).unwrap(), "testapp");
    }

    #[test]
    fn test_line_numbers_after_trimmed_newline() {
        let err = render("<%= appname -%>\nx\n<%= missing %>", &ctx()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownVariable {
                name: "missing".to_string(),
                line: 3
            }
        );
    }
}
