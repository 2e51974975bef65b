//! Display configuration
//!
//! Everything the driver needs to know about the attached module and its
//! link. Loading from TOML is available with the `toml` feature; with
//! `serde` alone the struct can be embedded in a larger config document.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use gu7000_protocol::PAGE_HEIGHT;

/// Largest transport chunk the driver will buffer
pub const MAX_CHUNK_SIZE: usize = 64;

/// Default transport chunk size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 4;

/// Default display width (GU140X32F)
pub const DEFAULT_WIDTH: u16 = 140;

/// Default display height (GU140X32F)
pub const DEFAULT_HEIGHT: u16 = 32;

/// Default screensaver delay in seconds
pub const DEFAULT_SCREENSAVER_DELAY_S: u32 = 60;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Height is not a multiple of 8
    UnalignedHeight,
    /// Chunk size is zero or above [`MAX_CHUNK_SIZE`]
    InvalidChunkSize,
    /// Brightness is not a fraction in `[0, 1]`
    InvalidBrightness,
    /// TOML text could not be parsed
    TomlParse,
}

/// Display and link configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: u16,
    /// Display height in pixels (multiple of 8)
    pub height: u16,
    /// Bytes written per flow-controlled chunk
    pub chunk_size: usize,
    /// Seconds of blank frames before the display is put to sleep
    pub screensaver_delay_s: u32,
    /// Initial brightness as a fraction in `[0, 1]`
    pub brightness: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            screensaver_delay_s: DEFAULT_SCREENSAVER_DELAY_S,
            brightness: 1.0,
        }
    }
}

impl DisplayConfig {
    /// Create a configuration for a `width` x `height` module with defaults
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every field against the device contract
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.height as usize % PAGE_HEIGHT != 0 {
            return Err(ConfigError::UnalignedHeight);
        }
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::InvalidChunkSize);
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::InvalidBrightness);
        }
        Ok(())
    }

    /// Screensaver delay in milliseconds
    pub fn screensaver_delay_ms(&self) -> u64 {
        self.screensaver_delay_s as u64 * 1_000
    }

    /// Parse and validate a configuration from TOML text
    ///
    /// Missing keys take their default value:
    ///
    /// ```toml
    /// width = 140
    /// height = 32
    /// chunk_size = 4
    /// screensaver_delay_s = 60
    /// brightness = 0.75
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|_| ConfigError::TomlParse)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.width, 140);
        assert_eq!(config.height, 32);
        assert_eq!(config.chunk_size, 4);
        assert_eq!(config.screensaver_delay_ms(), 60_000);
    }

    #[test]
    fn test_rejects_unaligned_height() {
        let config = DisplayConfig::new(140, 30);
        assert_eq!(config.validate(), Err(ConfigError::UnalignedHeight));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        assert_eq!(
            DisplayConfig::new(0, 32).validate(),
            Err(ConfigError::ZeroDimension)
        );
    }

    #[test]
    fn test_rejects_bad_chunk_size() {
        let mut config = DisplayConfig::default();
        config.chunk_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidChunkSize));
        config.chunk_size = MAX_CHUNK_SIZE + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidChunkSize));
    }

    #[test]
    fn test_rejects_bad_brightness() {
        let mut config = DisplayConfig::default();
        config.brightness = 1.2;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBrightness));
        config.brightness = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBrightness));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_partial() {
        let config = DisplayConfig::from_toml(
            r#"
            # GU256X64 module on a slow link
            width = 256
            height = 64
            brightness = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 256);
        assert_eq!(config.height, 64);
        assert_eq!(config.brightness, 0.5);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.screensaver_delay_s, DEFAULT_SCREENSAVER_DELAY_S);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_validates() {
        assert_eq!(
            DisplayConfig::from_toml("height = 20"),
            Err(ConfigError::UnalignedHeight)
        );
        assert_eq!(
            DisplayConfig::from_toml("width = \"wide\""),
            Err(ConfigError::TomlParse)
        );
    }
}
