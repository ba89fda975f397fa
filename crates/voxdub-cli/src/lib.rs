//! voxdub CLI library.
//!
//! Command implementations behind the `voxdub` binary, plus the input
//! handling and studio pipeline they share.

pub mod commands;
pub mod input;
pub mod pipeline;
