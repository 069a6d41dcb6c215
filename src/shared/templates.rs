//! HTML template rendering using Jinja2 syntax.
//!
//! Templates live in `templates/` at the crate root and are embedded at compile
//! time, so the binary does not depend on the working directory.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded templates as (name, source) pairs
const TEMPLATES: &[(&str, &str)] = &[(
    "incidencias/formulario.html",
    include_str!("../../templates/incidencias/formulario.html"),
)];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// `.html` templates are auto-escaped, so user supplied values are safe to
/// echo back into the page.
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_missing_template() {
        let result = render_template("definitely_not_a_real_template.html", Value::UNDEFINED);
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_form_template_escapes_values() {
        let ctx = minijinja::context! {
            title => "Incidencias",
            action => "/incidencias/formulario",
            statuses => Vec::<String>::new(),
            fields => vec![minijinja::context! {
                id => "numeroAula",
                label => "Aula",
                kind => "text",
                required => true,
                value => "\"><script>",
            }],
        };

        let html = render_template("incidencias/formulario.html", ctx).unwrap();
        assert!(html.contains("id=\"numeroAula\""));
        assert!(!html.contains("<script>"));
    }
}
