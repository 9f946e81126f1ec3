//! # Utility Modules
//!
//! Supporting utilities shared by binaries and tests that embed the codec.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` bootstrap driven by `LoggingConfig`

pub mod logging;
