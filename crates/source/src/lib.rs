pub mod backend;
pub mod error;
#[cfg(test)]
mod fixtures;
mod path;
mod resolve;
mod resource;

pub use crate::backend::ResourceSource;
pub use crate::path::{to_relative, validate as validate_path};
pub use crate::resolve::resolve;
pub use crate::resource::{Origin, Resource};

pub type SourceHandle = Box<dyn ResourceSource>;
