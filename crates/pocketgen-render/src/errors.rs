use thiserror::Error;

/// Failures while turning a compiled schema into source text.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("template render error: {0}")]
    Render(String),
    #[error("render context error: {0}")]
    Context(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
