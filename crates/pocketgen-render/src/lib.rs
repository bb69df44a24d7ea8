//! Renders compiled schemas into TypeScript client declarations.

pub mod context;
pub mod engine;
pub mod errors;
pub mod typescript;

pub use context::{CollectionView, RenderContext};
pub use engine::{DEFAULT_TEMPLATE, TemplateRenderer, render_typescript};
pub use errors::{RenderError, Result};
