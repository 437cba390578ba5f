//! Placeholder rendering for file templates.
//!
//! Templates are plain text with `{{ key }}` placeholders. Every placeholder
//! is looked up in the run's [`Options`]; there are no conditionals, loops or
//! filters. Text that merely contains single braces (JSON, Python dicts,
//! f-strings) passes through untouched.
//!
//! Templates whose placeholders sit inside JSON strings (notebooks) are
//! declared with [`Escape::Json`] so substituted values stay valid JSON.

use crate::domain::{
    entities::options::Options,
    error::{DomainError, DomainResult},
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// How substituted values are written into the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escape {
    /// Values are inserted verbatim.
    #[default]
    Plain,
    /// Values are escaped as the contents of a JSON string literal.
    Json,
}

impl Escape {
    fn apply(self, value: &str, out: &mut String) {
        match self {
            Self::Plain => out.push_str(value),
            Self::Json => {
                // A JSON string literal of a `str` always starts and ends with '"'.
                let quoted = serde_json::Value::from(value).to_string();
                out.push_str(&quoted[1..quoted.len() - 1]);
            }
        }
    }
}

/// A named template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSource {
    name: &'static str,
    body: &'static str,
    escape: Escape,
}

impl TemplateSource {
    pub const fn new(name: &'static str, body: &'static str) -> Self {
        Self {
            name,
            body,
            escape: Escape::Plain,
        }
    }

    /// A template whose placeholders all sit inside JSON strings.
    pub const fn json(name: &'static str, body: &'static str) -> Self {
        Self {
            name,
            body,
            escape: Escape::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Substitute every placeholder from `options`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UndefinedVariable`] for a key with no value
    /// - [`DomainError::UnterminatedPlaceholder`] for `{{` without `}}`
    pub fn render(&self, options: &Options) -> DomainResult<String> {
        render_escaped(self.name, self.body, options, self.escape)
    }
}

/// Render `body` by replacing `{{ key }}` placeholders with option values.
pub fn render(name: &str, body: &str, options: &Options) -> DomainResult<String> {
    render_escaped(name, body, options, Escape::Plain)
}

/// [`render`] with values written through `escape`.
///
/// Linear scan; the output is built in a single pass.
pub fn render_escaped(
    name: &str,
    body: &str,
    options: &Options,
    escape: Escape,
) -> DomainResult<String> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];
        let end = after_open
            .find(CLOSE)
            .ok_or_else(|| DomainError::UnterminatedPlaceholder {
                template: name.to_owned(),
            })?;

        let key = after_open[..end].trim();
        let value = options
            .get(key)
            .ok_or_else(|| DomainError::UndefinedVariable {
                template: name.to_owned(),
                variable: key.to_owned(),
            })?;
        escape.apply(value, &mut out);

        rest = &after_open[end + CLOSE.len()..];
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::new()
            .with("project", "my-project")
            .with("package", "my_project")
    }

    #[test]
    fn substitutes_placeholders_with_and_without_spaces() {
        let out = render("t", "{{project}} / {{ package }}", &opts()).unwrap();
        assert_eq!(out, "my-project / my_project");
    }

    #[test]
    fn single_braces_pass_through() {
        let body = r#"{"cells": [], "name": "{{ package }}", "f": f"{x}"}"#;
        let out = render("nb", body, &opts()).unwrap();
        assert_eq!(out, r#"{"cells": [], "name": "my_project", "f": f"{x}"}"#);
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(render("t", "*\n!.gitignore\n", &opts()).unwrap(), "*\n!.gitignore\n");
        assert_eq!(render("t", "", &opts()).unwrap(), "");
    }

    #[test]
    fn undefined_variable_names_template_and_key() {
        let err = render("readme", "by {{ author }}", &opts()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UndefinedVariable {
                template: "readme".into(),
                variable: "author".into(),
            }
        );
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let err = render("broken", "{{ project", &opts()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnterminatedPlaceholder {
                template: "broken".into()
            }
        );
    }

    #[test]
    fn json_escape_keeps_string_literals_valid() {
        let opts = Options::new().with("project", "say \"hi\"\nback\\slash");
        let out = render_escaped("nb", r##"{"title": "# {{ project }}"}"##, &opts, Escape::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["title"], "# say \"hi\"\nback\\slash");
    }

    #[test]
    fn plain_escape_is_verbatim() {
        let opts = Options::new().with("project", "a\"b");
        let out = render("t", "{{ project }}", &opts).unwrap();
        assert_eq!(out, "a\"b");
    }

    #[test]
    fn template_source_renders_its_body() {
        let source = TemplateSource::new("setup", "name = {{ project }}");
        assert_eq!(source.name(), "setup");
        assert_eq!(source.render(&opts()).unwrap(), "name = my-project");
    }
}
