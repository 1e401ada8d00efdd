//! Application ports (traits) for external dependencies.
//!
//! Ports define what the engine needs from the outside world. Adapters in
//! `kiln-adapters` implement these.
//!
//! - **Driven (Output) Ports**: called by the generator, implemented by
//!   infrastructure
//!   - `MetadataCatalog`: dependency metadata lookup
//!   - `ProjectPackager`: archive writing

pub mod output;

#[cfg(test)]
pub use output::MockMetadataCatalog;
pub use output::{MetadataCatalog, ProjectPackager};
