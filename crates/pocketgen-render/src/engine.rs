use tracing::debug;

use pocketgen_core::CompiledSchema;

use crate::context::RenderContext;
use crate::errors::{RenderError, Result};

/// Built-in TypeScript client template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/typescript.liquid");

/// Liquid template bound to a compiled schema at render time.
pub struct TemplateRenderer {
    template: liquid::Template,
}

impl TemplateRenderer {
    /// Renderer for the built-in TypeScript template.
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Renderer for caller-provided template text.
    pub fn with_template(source: &str) -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|err| RenderError::Parse(err.to_string()))?;
        let template = parser
            .parse(source)
            .map_err(|err| RenderError::Parse(err.to_string()))?;
        Ok(Self { template })
    }

    pub fn render(&self, schema: &CompiledSchema) -> Result<String> {
        let context = RenderContext::from_schema(schema);
        let globals = liquid::model::to_object(&context)
            .map_err(|err| RenderError::Context(err.to_string()))?;

        let output = self
            .template
            .render(&globals)
            .map_err(|err| RenderError::Render(err.to_string()))?;

        debug!(
            event = "template_rendered",
            collections = context.collections.len(),
            bytes = output.len()
        );
        Ok(output)
    }
}

/// Render with the built-in TypeScript template.
pub fn render_typescript(schema: &CompiledSchema) -> Result<String> {
    TemplateRenderer::new()?.render(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_parses() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn custom_template_sees_context() {
        let renderer = TemplateRenderer::with_template(
            "{% for c in collections %}{{ c.type_name }};{% endfor %}",
        )
        .unwrap();
        let schema = CompiledSchema {
            collections: Vec::new(),
        };
        assert_eq!(renderer.render(&schema).unwrap(), "");
    }

    #[test]
    fn broken_template_is_a_parse_error() {
        let err = TemplateRenderer::with_template("{% for c in collections %}").err();
        assert!(matches!(err, Some(RenderError::Parse(_))));
    }
}
