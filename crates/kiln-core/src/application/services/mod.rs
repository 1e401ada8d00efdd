//! Application services - orchestrate generation.

pub mod generation;
pub mod ordering;
pub mod run;

pub use generation::{
    DIRECTORY_CONTENT_TYPE, GenerationContent, GenerationOptions, GenerationResult, OutputKind,
    ProjectGenerator,
};
pub use run::{GeneratedContent, GenerationRun, RunOutput, RunState};
