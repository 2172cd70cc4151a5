//! Burst styles and their parameter bundles.
//!
//! A [`Style`] names one of the built-in burst looks; it resolves to a
//! [`StyleParams`] bundle exactly once, at activation, and the burst keeps
//! that bundle for its whole life.
//!
//! | Style            | Count | Look                                      |
//! |------------------|-------|-------------------------------------------|
//! | [`Style::Game`]  | 55    | Spinning solid white squares, snappy fall |
//! | [`Style::Media`] | 45    | Hot/cool circles, about a third hollow    |
//!
//! The bundles have public fields, so a preset is a starting point rather
//! than a straitjacket: tweak one and hand it to
//! [`BurstLoop::activate_with`](crate::BurstLoop::activate_with).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use glam::Vec3;

use crate::error::ParseStyleError;

/// Fill color of game-style squares.
pub const GAME_COLOR: Vec3 = Vec3::ONE;

/// Warm half of the media style's per-frame color roll.
pub const MEDIA_HOT: ColorPair = ColorPair {
    fill: Vec3::new(1.0, 0.42, 0.21),
    stroke: Vec3::new(1.0, 0.66, 0.38),
};

/// Cold half of the media style's per-frame color roll.
pub const MEDIA_COOL: ColorPair = ColorPair {
    fill: Vec3::new(0.22, 0.6, 0.98),
    stroke: Vec3::new(0.45, 0.78, 1.0),
};

/// A fill/stroke color pairing for media-style particles.
///
/// Solid particles use `fill`, hollow ones use `stroke`; the pair itself is
/// re-rolled 50/50 between [`MEDIA_HOT`] and [`MEDIA_COOL`] for every
/// particle on every frame, which is what gives the media burst its
/// flicker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    /// Color used when the particle is filled.
    pub fill: Vec3,
    /// Color used when the particle is stroked.
    pub stroke: Vec3,
}

/// The closed set of built-in burst styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Burst of spinning solid white squares.
    Game,
    /// Burst of hot/cool circles, some of them hollow.
    Media,
}

impl Style {
    /// Resolve this style's parameter bundle.
    pub fn params(&self) -> StyleParams {
        match self {
            Style::Game => StyleParams::game(),
            Style::Media => StyleParams::media(),
        }
    }

    /// The selector string this style parses from.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Game => "game",
            Style::Media => "media",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Style::Game),
            "media" => Ok(Style::Media),
            other => Err(ParseStyleError::unknown_style(other)),
        }
    }
}

/// Parse a caller-supplied style selector, where `"none"` selects nothing.
///
/// Any other unrecognized value is a contract mismatch between the caller
/// and this crate, and fails fast instead of defaulting.
pub fn parse_selector(s: &str) -> Result<Option<Style>, ParseStyleError> {
    if s == "none" {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| ParseStyleError::unknown_selector(s))
}

/// Everything the factory and the per-frame step need to know about a
/// style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleParams {
    /// Particles created at activation.
    pub count: usize,
    /// Emission speed range, units/second.
    pub speed: RangeInclusive<f32>,
    /// Spawn size range (square side or circle diameter), units.
    pub size: RangeInclusive<f32>,
    /// Downward acceleration, units/second^2.
    pub gravity: f32,
    /// Per-frame velocity retention at the 60 fps reference. Lower means
    /// thicker air.
    pub drag: f32,
    /// Life drained per second; 1 / fade is the particle lifetime.
    pub fade: f32,
    /// Probability in [0, 1] that a spawned particle is hollow.
    pub hollow_chance: f64,
}

impl StyleParams {
    /// The bundle behind [`Style::Game`]: a dense, fast, short-lived pop.
    pub fn game() -> Self {
        Self {
            count: 55,
            speed: 180.0..=460.0,
            size: 3.0..=8.0,
            gravity: 520.0,
            drag: 0.86,
            fade: 1.35,
            hollow_chance: 0.0,
        }
    }

    /// The bundle behind [`Style::Media`]: floatier, longer-lived circles
    /// with a chance of spawning hollow.
    pub fn media() -> Self {
        Self {
            count: 45,
            speed: 150.0..=400.0,
            size: 4.0..=9.0,
            gravity: 420.0,
            drag: 0.88,
            fade: 1.2,
            hollow_chance: 0.35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_roundtrip() {
        for style in [Style::Game, Style::Media] {
            assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
            assert_eq!(style.to_string(), style.as_str());
        }
    }

    #[test]
    fn test_unknown_selector_fails_fast() {
        let err = "confetti".parse::<Style>().unwrap_err();
        assert_eq!(err.selector(), "confetti");
        assert!(err.to_string().contains("confetti"));
    }

    #[test]
    fn test_parse_selector_maps_none_to_no_style() {
        assert_eq!(parse_selector("none").unwrap(), None);
        assert_eq!(parse_selector("game").unwrap(), Some(Style::Game));
        assert_eq!(parse_selector("media").unwrap(), Some(Style::Media));
        assert!(parse_selector("").is_err());
        assert!(parse_selector("Game").is_err(), "selectors are exact");
    }

    #[test]
    fn test_parse_errors_list_what_each_entry_point_accepts() {
        let style_err = "none".parse::<Style>().unwrap_err();
        assert_eq!(
            style_err.to_string(),
            "Unknown burst style \"none\". Expected \"game\" or \"media\"."
        );

        let selector_err = parse_selector("sparkle").unwrap_err();
        assert_eq!(selector_err.selector(), "sparkle");
        assert_eq!(
            selector_err.to_string(),
            "Unknown burst selector \"sparkle\". Expected \"game\", \"media\" or \"none\"."
        );
    }

    #[test]
    fn test_only_media_spawns_hollow() {
        assert_eq!(StyleParams::game().hollow_chance, 0.0);
        assert!(StyleParams::media().hollow_chance > 0.0);
    }
}
