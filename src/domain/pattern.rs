//! Chart pattern lessons.

use crate::domain::chart::{Chart, LevelKind};
use crate::domain::stepper::{Advance, Stepper};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLevel {
    pub name: &'static str,
    pub price: f64,
}

#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub signal: &'static str,
    pub prices: &'static [f64],
    pub key_levels: &'static [KeyLevel],
}

impl Pattern {
    /// Price chart; key levels are drawn only once the signal is revealed.
    pub fn chart(&self, revealed: bool) -> Chart {
        let chart = Chart::line(self.name, self.prices);
        if !revealed {
            return chart;
        }
        self.key_levels.iter().fold(chart, |chart, level| {
            chart.with_level(level.name, level.price, LevelKind::Key)
        })
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Head and Shoulders",
        description: "A reversal pattern that forms after an uptrend. It consists of a peak \
            (shoulder), followed by a higher peak (head), and then another lower peak (shoulder).",
        signal: "Bearish reversal - indicates potential trend change from up to down",
        prices: &[100.0, 110.0, 105.0, 120.0, 105.0, 110.0, 95.0, 90.0],
        key_levels: &[
            KeyLevel { name: "neckline", price: 105.0 },
            KeyLevel { name: "target", price: 90.0 },
        ],
    },
    Pattern {
        name: "Double Bottom",
        description: "A bullish reversal pattern that appears after a downtrend. Price tests a \
            support level twice, failing to break below, forming a \"W\" shape.",
        signal: "Bullish reversal - indicates potential trend change from down to up",
        prices: &[100.0, 85.0, 95.0, 90.0, 85.0, 95.0, 105.0, 110.0],
        key_levels: &[
            KeyLevel { name: "support", price: 85.0 },
            KeyLevel { name: "resistance", price: 95.0 },
        ],
    },
    Pattern {
        name: "Bull Flag",
        description: "A continuation pattern that occurs during an uptrend. After a strong rally \
            (flagpole), price consolidates in a slight downward channel before breaking out upward.",
        signal: "Bullish continuation - expect uptrend to resume",
        prices: &[80.0, 90.0, 100.0, 98.0, 96.0, 94.0, 102.0, 110.0],
        key_levels: &[
            KeyLevel { name: "flagTop", price: 98.0 },
            KeyLevel { name: "flagBottom", price: 94.0 },
        ],
    },
    Pattern {
        name: "Triangle Consolidation",
        description: "Price forms higher lows and lower highs, creating converging trendlines. \
            Volume typically decreases during formation.",
        signal: "Continuation pattern - breakout direction determines trade direction",
        prices: &[95.0, 105.0, 97.0, 103.0, 99.0, 101.0, 100.0, 108.0],
        key_levels: &[KeyLevel { name: "apex", price: 100.0 }],
    },
];

pub const KEY_CONCEPTS: &[(&str, &str)] = &[
    ("Formation", "Look for this pattern after a clear preceding trend"),
    ("Volume", "Volume should confirm the pattern (increase on breakout)"),
    ("Confirmation", "Wait for price to break key levels before entering"),
    ("Risk Management", "Place stops beyond the pattern extremes"),
];

/// Step-through state of the pattern module.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternWalkthrough {
    stepper: Stepper,
    revealed: bool,
}

impl Default for PatternWalkthrough {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternWalkthrough {
    pub fn new() -> Self {
        Self {
            stepper: Stepper::new(PATTERNS.len()),
            revealed: false,
        }
    }

    pub fn current(&self) -> &'static Pattern {
        &PATTERNS[self.stepper.index()]
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn next(&mut self) -> Advance {
        let advance = self.stepper.next();
        if let Advance::Moved(_) = advance {
            self.revealed = false;
        }
        advance
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.stepper.previous();
        if moved {
            self.revealed = false;
        }
        moved
    }
}
