//! CLI command implementations

pub mod digest;
pub mod doctor;
pub mod encode;
pub mod inspect;
pub mod json_output;
pub mod languages;
pub mod transcribe;
pub mod translate;
pub mod voiceover;
