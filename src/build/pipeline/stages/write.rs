//! File writing stage.

use crate::build::paths::location_to_output_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingPage, Stage};

/// Stage that writes rendered pages to the output directory.
///
/// Each page goes to `{output_dir}/{location}.html`; parent directories
/// are created as needed.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        docs: &mut [ProcessingPage<'_>],
        ctx: &PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            let html = doc.output_html.as_ref().ok_or_else(|| {
                PipelineError::stage(
                    "write",
                    format!(
                        "page '{}' has no output HTML (was template stage run?)",
                        doc.location()
                    ),
                )
            })?;

            let output_path = location_to_output_path(doc.location(), ctx.output_dir);

            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            std::fs::write(&output_path, html).map_err(|source| PipelineError::Write {
                path: output_path.clone(),
                source,
            })?;
            log::debug!("Wrote {}", output_path.display());
        }

        Ok(())
    }
}
