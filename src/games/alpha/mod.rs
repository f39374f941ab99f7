//! "Alpha" mode: an endless desk of single-slot prompt forms.
//!
//! - Forms come from a shuffled prompt cycle, one required field each
//! - Each success speeds up arrivals and is worth more under pressure
//! - The starter inventory holds one block of every field type
//! - The run ends after three failures or when the desk overflows

mod game;

pub use game::{default_prompts, starter_blocks, AlphaGameBuilder};
