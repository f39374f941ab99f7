//! Ready-made game setups built on the engine.

pub mod alpha;
