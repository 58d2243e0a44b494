//! Default pipeline stages.
//!
//! 1. **TemplateStage** - Compose each page with the renderer for its type
//! 2. **WriteStage** - Write final HTML to the output directory

mod template;
mod write;

pub use template::TemplateStage;
pub use write::WriteStage;
