mod blog;
mod builder;
mod dates;
pub mod format;
mod front_matter;
mod highlight;
mod markdown;
pub mod page;
mod paths;
pub mod pipeline;
mod render;
pub mod source;

pub use builder::{BuildError, BuildResult, Builder};
pub use paths::base_path_from_config;
