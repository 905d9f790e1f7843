pub mod config;
pub mod contacts;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod scoring;

pub use error::PipelineError;

// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INPUT: i32 = 2;
pub const EXIT_PARSE: i32 = 3;
pub const EXIT_CONFIG: i32 = 4;
pub const EXIT_WRITE: i32 = 5;
pub const EXIT_USAGE: i32 = 64;
