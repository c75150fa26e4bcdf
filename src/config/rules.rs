//! Threshold rules mapping a usage percentage to a colour pair
//!
//! A `RuleSet` is kept sorted from the highest threshold to the lowest, so
//! the first rule whose threshold is at or below a value is the band that
//! value falls into.

use crossterm::style::Color;

use crate::constants::{BAND_CRITICAL, BAND_ELEVATED, BAND_HIGH, BAND_MODERATE, BAND_SEVERE};

/// Background and foreground colour applied to one table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub background: Color,
    pub foreground: Color,
}

impl ColorPair {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// A percentage threshold and the colours used at or above it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRule {
    /// Lower bound of the band, in percent
    pub threshold: f64,
    /// Colours for values inside the band
    pub colors: ColorPair,
}

impl ColorRule {
    pub const fn new(threshold: f64, background: Color, foreground: Color) -> Self {
        Self {
            threshold,
            colors: ColorPair::new(background, foreground),
        }
    }
}

/// Ordered threshold rules, highest threshold first
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<ColorRule>,
}

impl RuleSet {
    /// Builds a rule set, normalizing the order to descending thresholds.
    ///
    /// Rules with equal thresholds keep their input order, so the one listed
    /// first wins.
    pub fn new(mut rules: Vec<ColorRule>) -> Self {
        rules.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Self { rules }
    }

    /// The built-in bands used when no configuration is available.
    pub fn builtin() -> Self {
        Self::new(vec![
            ColorRule::new(BAND_CRITICAL, Color::Red, Color::White),
            ColorRule::new(BAND_SEVERE, Color::DarkRed, Color::White),
            ColorRule::new(BAND_HIGH, Color::DarkYellow, Color::Black),
            ColorRule::new(BAND_ELEVATED, Color::Yellow, Color::Black),
            ColorRule::new(BAND_MODERATE, Color::DarkGreen, Color::White),
        ])
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    /// Returns the first rule whose threshold is at or below `percent`.
    pub fn band(&self, percent: f64) -> Option<&ColorRule> {
        self.rules.iter().find(|rule| rule.threshold <= percent)
    }
}

/// Maps a percentage to the colours of its band.
///
/// Falls back to `default_foreground` on black when no rule qualifies.
#[must_use]
pub fn colorize(percent: f64, rules: &RuleSet, default_foreground: Color) -> ColorPair {
    rules
        .band(percent)
        .map(|rule| rule.colors)
        .unwrap_or(ColorPair::new(Color::Black, default_foreground))
}

/// Everything the renderer needs to colour a row
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub cpu: RuleSet,
    pub memory: RuleSet,
    pub default_foreground: Color,
}

impl Palette {
    pub fn cpu_colors(&self, percent: f64) -> ColorPair {
        colorize(percent, &self.cpu, self.default_foreground)
    }

    pub fn memory_colors(&self, percent: f64) -> ColorPair {
        colorize(percent, &self.memory, self.default_foreground)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cpu: RuleSet::builtin(),
            memory: RuleSet::builtin(),
            default_foreground: Color::Cyan,
        }
    }
}
