//! Dependency metadata catalog adapters.

mod builtin;
mod memory;

pub use memory::InMemoryCatalog;
