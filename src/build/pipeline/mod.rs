//! Build pipeline for page rendering.
//!
//! The pipeline takes converted, included pages through a series of stages:
//! 1. Template rendering (page type dispatch, header and footer)
//! 2. File writing (output to disk)
//!
//! Custom stages can be inserted before or after any named stage.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingPage;
pub use error::PipelineError;

use stages::{TemplateStage, WriteStage};

/// A stage in the page processing pipeline.
///
/// Stages run sequentially. Each stage receives all pages and can update
/// their processing state in place before the next stage runs.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used for insertion points).
    fn name(&self) -> &'static str;

    /// Process pages through this stage.
    fn process(
        &self,
        docs: &mut [ProcessingPage<'_>],
        ctx: &PipelineContext<'_>,
    ) -> Result<(), PipelineError>;
}

/// The page processing pipeline.
///
/// The default pipeline is: template → write.
///
/// # Extension Points
///
/// ```ignore
/// pipeline.insert_before("write", MinifyStage)?;
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Insert a stage before the named stage.
    pub fn insert_before<S: Stage + 'static>(
        &mut self,
        name: &str,
        stage: S,
    ) -> Result<&mut Self, PipelineError> {
        let pos = self.position(name)?;
        self.stages.insert(pos, Box::new(stage));
        Ok(self)
    }

    /// Insert a stage after the named stage.
    pub fn insert_after<S: Stage + 'static>(
        &mut self,
        name: &str,
        stage: S,
    ) -> Result<&mut Self, PipelineError> {
        let pos = self.position(name)?;
        self.stages.insert(pos + 1, Box::new(stage));
        Ok(self)
    }

    fn position(&self, name: &str) -> Result<usize, PipelineError> {
        self.stages
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| PipelineError::UnknownStage(name.to_string()))
    }

    /// Run the pipeline on a set of pages.
    pub fn run(
        &self,
        docs: &mut [ProcessingPage<'_>],
        ctx: &PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            stage.process(docs, ctx)?;
        }
        Ok(())
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
