//! voxdub Integration Test Infrastructure
//!
//! Shared pieces for the integration tests in `tests/`:
//!
//! - [`format_validators`]: an independent WAV header parser, used to check
//!   the encoder without going through its own inspection code
//! - [`mock_server`]: a local stand-in for the speech service's REST API
//! - [`harness`]: runs the `voxdub` binary in a scratch directory
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p voxdub-tests
//! ```

pub mod format_validators;
pub mod harness;
pub mod mock_server;

pub use format_validators::{validate_wav, FormatError, WavInfo};
pub use harness::{CliHarness, CliResult};
pub use mock_server::{MockResponse, MockServer, RecordedRequest};
