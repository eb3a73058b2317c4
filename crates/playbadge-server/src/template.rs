//! Index page template rendering
//!
//! Two constructs are understood:
//!
//! - `{{ name }}` is replaced by the HTML-escaped value of variable `name`
//! - `{{items:TABLE}}BODY{{end}}` repeats BODY once per row of `TABLE`,
//!   with the row available as `{{ $k }}` and `{{ $v }}`
//!
//! Unknown variables and tables are left in the output as written.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Template compiled into the binary
pub const EMBEDDED_TEMPLATE: &str = include_str!("../templates/index.html");

static ITEMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{items:(\w+)\}\}(.*?)\{\{end\}\}").expect("invalid items regex")
});

static VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\$?\w+)\s*\}\}").expect("invalid variable regex"));

/// Variables and tables available to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: HashMap<String, String>,
    tables: HashMap<String, Vec<(String, String)>>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add a table of key/value rows
    pub fn table<K, V>(mut self, name: impl Into<String>, rows: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let rows = rows.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.tables.insert(name.into(), rows);
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Render `template` against `ctx`
pub fn render(template: &str, ctx: &TemplateContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in ITEMS_REGEX.captures_iter(template) {
        let Some(block) = caps.get(0) else {
            continue;
        };
        out.push_str(&substitute_vars(&template[last..block.start()], |name| {
            ctx.lookup(name)
        }));

        match ctx.tables.get(&caps[1]) {
            Some(rows) => {
                let body = &caps[2];
                let rendered: Vec<String> = rows
                    .iter()
                    .map(|(k, v)| {
                        substitute_vars(body, |name| match name {
                            "$k" => Some(k.as_str()),
                            "$v" => Some(v.as_str()),
                            _ => ctx.lookup(name),
                        })
                    })
                    .collect();
                out.push_str(&rendered.join("\n"));
            }
            None => out.push_str(block.as_str()),
        }
        last = block.end();
    }

    out.push_str(&substitute_vars(&template[last..], |name| ctx.lookup(name)));
    out
}

fn substitute_vars<'a>(text: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    VAR_REGEX
        .replace_all(text, |caps: &Captures| match lookup(&caps[1]) {
            Some(value) => escape_html(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_tolerate_whitespace() {
        let ctx = TemplateContext::new().var("appid", "org.example.app");
        assert_eq!(
            render("<b>{{appid}}</b> {{  appid }}", &ctx),
            "<b>org.example.app</b> org.example.app"
        );
    }

    #[test]
    fn test_unknown_variable_is_kept() {
        let ctx = TemplateContext::new();
        assert_eq!(render("x {{ nope }} y", &ctx), "x {{ nope }} y");
    }

    #[test]
    fn test_values_are_escaped() {
        let ctx = TemplateContext::new().var("label", "<script>\"a\" & 'b'</script>");
        assert_eq!(
            render("{{ label }}", &ctx),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_values_are_not_rendered_again() {
        let ctx = TemplateContext::new()
            .var("label", "{{ appid }}")
            .var("appid", "org.example.app");
        assert_eq!(render("{{ label }}", &ctx), "{{ appid }}");
    }

    #[test]
    fn test_items_block() {
        let ctx = TemplateContext::new()
            .var("label", "L")
            .table("rows", [("$version", "App version"), ("$name", "Name")]);
        let html = render(
            "<ul>{{items:rows}}<li>{{ $k }}={{ $v }} {{label}}</li>{{end}}</ul>",
            &ctx,
        );
        assert_eq!(
            html,
            "<ul><li>$version=App version L</li>\n<li>$name=Name L</li></ul>"
        );
    }

    #[test]
    fn test_items_block_spans_lines() {
        let ctx = TemplateContext::new().table("rows", [("a", "1")]);
        assert_eq!(render("{{items:rows}}\n<i>{{$k}}</i>\n{{end}}", &ctx), "\n<i>a</i>\n");
    }

    #[test]
    fn test_unknown_table_is_kept() {
        let ctx = TemplateContext::new().var("x", "1");
        let template = "{{items:missing}}{{ x }}{{end}} {{ x }}";
        assert_eq!(render(template, &ctx), "{{items:missing}}{{ x }}{{end}} 1");
    }

    #[test]
    fn test_embedded_template_uses_every_variable() {
        for name in ["appid", "label", "message", "displayLanguage", "country"] {
            assert!(
                VAR_REGEX
                    .captures_iter(EMBEDDED_TEMPLATE)
                    .any(|caps| &caps[1] == name),
                "{name}"
            );
        }
        assert!(EMBEDDED_TEMPLATE.contains("{{items:placeHolders}}"));
    }
}
