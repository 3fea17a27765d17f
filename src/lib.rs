//! Interactive generator for Python 3.6+ package skeletons.
//!
//! A run asks for a few answers (package name, author, CI preference, ...),
//! remembers them in `.pyskel-rc.json` inside the destination and renders the
//! embedded templates into a ready to use package layout.

pub mod answers;
pub mod args;
pub mod error;
pub mod generator;
pub mod license;
pub mod log;
pub mod prompt;
pub mod store;
pub mod template;
pub mod update;
pub mod writer;

pub use answers::{Answers, Field};
pub use error::ScaffoldError;
pub use generator::{Generator, GeneratorBuilder};
