//! Crate-level error types.
//!
//! The transform stage itself has no failure path; these cover the GPU,
//! shader and options plumbing around it.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the splatter crate.
#[derive(Debug)]
pub enum SplatterError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL composition or validation failure.
    Shader(String),
    /// Reading a render target back to the CPU failed.
    Readback(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SplatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Readback(msg) => write!(f, "readback error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SplatterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SplatterError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for SplatterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = SplatterError::from(std::io::Error::other("disk gone"));
        assert_eq!(err.to_string(), "I/O error: disk gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn message_variants_have_no_source() {
        let err = SplatterError::Shader("bad import".to_owned());
        assert_eq!(err.to_string(), "shader error: bad import");
        assert!(err.source().is_none());
    }
}
