//! HTML rendering: expands template markup with normalized variables.

use crate::RenderError;
use docket_core::normalize::TemplateVariables;
use docket_core::TemplateRecord;
use handlebars::{handlebars_helper, Handlebars, JsonValue};

/// Expands a template's markup into finished HTML.
pub trait HtmlRenderer: Send + Sync {
    fn render(
        &self,
        template: &TemplateRecord,
        variables: &TemplateVariables,
    ) -> Result<String, RenderError>;
}

/// Handlebars-backed renderer.
///
/// Strict mode is off: a marker with no matching variable renders empty.
/// `{{x}}` is HTML-escaped, `{{{x}}}` is emitted raw. Besides the engine's
/// built-ins (`if`, `each`, `with`, `lookup`, `eq`, …) the `inc` helper is
/// registered for turning a zero-based `@index` into an ordinal.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

handlebars_helper!(inc: |value: Json| increment(value));

/// `value + 1` for numbers and numeric strings; `1` for anything else.
fn increment(value: &JsonValue) -> JsonValue {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => leading_int(s).map(|i| i as f64),
        _ => None,
    };
    match n {
        Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => JsonValue::from(n as i64 + 1),
        Some(n) => JsonValue::from(n + 1.0),
        None => JsonValue::from(1),
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_helper("inc", Box::new(inc));
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer for HandlebarsRenderer {
    fn render(
        &self,
        template: &TemplateRecord,
        variables: &TemplateVariables,
    ) -> Result<String, RenderError> {
        let html = self
            .registry
            .render_template(&template.content, &variables.to_json())?;
        tracing::debug!(
            template_id = %template.id,
            size_bytes = html.len(),
            "template rendered"
        );
        Ok(html)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
