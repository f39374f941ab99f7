//! Form spawn sources.
//!
//! - [`FormSpawnSource`]: trait the manager pulls extra forms from
//! - [`PromptSpec`] / [`PromptLibrary`]: single-slot prompt authoring
//! - [`PromptFormFactory`]: prompt to runtime definition
//! - [`PromptSpawnSource`]: shuffled, optionally looping prompt cycle

mod prompt;
mod prompt_source;
mod source;

pub use prompt::{PromptFormFactory, PromptLibrary, PromptSpec};
pub use prompt_source::PromptSpawnSource;
pub use source::FormSpawnSource;
