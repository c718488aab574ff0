use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Rendered-byte cap of a diff report.
pub const DEFAULT_MAX_BYTES: usize = 4096;
/// Rendered-line cap of a diff report.
pub const DEFAULT_MAX_LINES: usize = 256;

/// Decides which one-sided differences a comparison reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Expected describes a subset: content only present in the actual
    /// document is ignored (default).
    #[default]
    Partial,
    /// Content only present in the actual document is reported too: unexpected
    /// keys and inserted array elements.
    Strict,
}

/// Configuration passed to document comparisons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    mode: CompareMode,
    max_bytes: usize,
    max_lines: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { mode: CompareMode::Partial, max_bytes: DEFAULT_MAX_BYTES, max_lines: DEFAULT_MAX_LINES }
    }
}

impl CompareOptions {
    /// Shorthand for default options in strict mode.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_mode(CompareMode::Strict)
    }

    /// Returns the reporting mode.
    ///
    /// ```
    /// # use vouch_core::{CompareMode, CompareOptions};
    /// assert_eq!(CompareOptions::default().mode(), CompareMode::Partial);
    /// assert_eq!(CompareOptions::strict().mode(), CompareMode::Strict);
    /// ```
    #[must_use]
    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    /// Returns the rendered-byte cap of the report.
    #[must_use]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns the rendered-line cap of the report.
    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Sets the reporting mode.
    #[must_use]
    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the rendered-byte cap.
    ///
    /// ```
    /// # use vouch_core::{CompareOptions, OptionsError};
    /// let opts = CompareOptions::default().with_max_bytes(512)?;
    /// assert_eq!(opts.max_bytes(), 512);
    /// assert_eq!(CompareOptions::default().with_max_bytes(0), Err(OptionsError::ZeroMaxBytes));
    /// # Ok::<(), OptionsError>(())
    /// ```
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Result<Self, OptionsError> {
        self.max_bytes = max_bytes;
        self.validate()?;
        Ok(self)
    }

    /// Sets the rendered-line cap.
    pub fn with_max_lines(mut self, max_lines: usize) -> Result<Self, OptionsError> {
        self.max_lines = max_lines;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.max_bytes == 0 {
            return Err(OptionsError::ZeroMaxBytes);
        }
        if self.max_lines == 0 {
            return Err(OptionsError::ZeroMaxLines);
        }
        Ok(())
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Partial => f.write_str("partial"),
            CompareMode::Strict => f.write_str("strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_caps() {
        let opts = CompareOptions::default();
        assert_eq!(opts.mode(), CompareMode::Partial);
        assert_eq!(opts.max_bytes(), 4096);
        assert_eq!(opts.max_lines(), 256);
    }

    #[test]
    fn zero_caps_are_rejected() {
        assert_eq!(CompareOptions::default().with_max_lines(0), Err(OptionsError::ZeroMaxLines));
        assert_eq!(CompareOptions::default().with_max_bytes(0), Err(OptionsError::ZeroMaxBytes));
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&CompareOptions::strict()).unwrap();
        assert_eq!(json, r#"{"mode":"strict","max_bytes":4096,"max_lines":256}"#);
        assert_eq!(CompareMode::Partial.to_string(), "partial");
    }
}
