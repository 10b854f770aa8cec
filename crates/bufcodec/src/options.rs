/// Line length used by MIME (RFC 2045) base64 bodies.
pub const MIME_LINE_LENGTH: usize = 76;

/// Configuration for [`Base64Encoder`](crate::Base64Encoder).
///
/// # Examples
///
/// ```rust
/// use bufcodec::{Base64Encoder, EncoderOptions};
///
/// let encoder = Base64Encoder::new(EncoderOptions {
///     wrap_column: 64,
/// });
/// assert_eq!(encoder.options().wrap_column, 64);
/// ```
///
/// # Default
///
/// No line wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderOptions {
    /// Number of output characters per line.
    ///
    /// When non-zero, the encoder emits `\r\n` after every `wrap_column`
    /// characters (padding included) and terminates a flushed partial line
    /// with `\r\n` as well. `0` disables wrapping.
    ///
    /// # Default
    ///
    /// `0`
    pub wrap_column: usize,
}

impl EncoderOptions {
    /// Options producing MIME-style output: lines of
    /// [`MIME_LINE_LENGTH`] characters.
    #[must_use]
    pub const fn mime() -> Self {
        Self {
            wrap_column: MIME_LINE_LENGTH,
        }
    }

    /// Returns `true` if line breaks will be inserted.
    #[inline]
    #[must_use]
    pub const fn wraps(&self) -> bool {
        self.wrap_column != 0
    }
}
