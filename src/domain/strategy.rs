//! Entry and exit strategy lessons.

use crate::domain::chart::{Chart, LevelKind};
use crate::domain::risk::reward_to_risk;

#[derive(Debug, Clone, Copy)]
pub struct EntryMark {
    /// 1-based bar position of the entry.
    pub x: usize,
    pub price: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PriceLevel {
    pub price: f64,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct EntryStrategy {
    pub title: &'static str,
    pub description: &'static str,
    pub prices: &'static [f64],
    pub entry: EntryMark,
    pub stop: PriceLevel,
    pub target: PriceLevel,
    pub rules: &'static [&'static str],
}

impl EntryStrategy {
    pub fn risk_per_share(&self) -> f64 {
        self.entry.price - self.stop.price
    }

    pub fn reward_per_share(&self) -> f64 {
        self.target.price - self.entry.price
    }

    pub fn reward_to_risk(&self) -> Option<f64> {
        reward_to_risk(self.entry.price, self.stop.price, self.target.price)
    }

    /// Ratio as shown on the lesson card, e.g. `R:R = 2.5:1`.
    pub fn reward_to_risk_label(&self) -> String {
        match self.reward_to_risk() {
            Some(ratio) => format!("R:R = {ratio:.1}:1"),
            None => "R:R = n/a".to_string(),
        }
    }

    pub fn chart(&self) -> Chart {
        Chart::line(self.title, self.prices)
            .with_level("Stop Loss", self.stop.price, LevelKind::Stop)
            .with_level("Target", self.target.price, LevelKind::Target)
            .with_marker(self.entry.x, "Entry")
    }
}

pub const STRATEGIES: &[EntryStrategy] = &[
    EntryStrategy {
        title: "Pullback Entry",
        description: "Enter on a pullback to support within an established uptrend",
        prices: &[100.0, 108.0, 115.0, 112.0, 107.0, 109.0, 116.0, 122.0],
        entry: EntryMark { x: 6, price: 109.0, label: "Entry at support" },
        stop: PriceLevel { price: 105.0, label: "Stop below support" },
        target: PriceLevel { price: 120.0, label: "Target at resistance" },
        rules: &[
            "Identify clear uptrend on higher timeframe",
            "Wait for pullback to support level or moving average",
            "Look for reversal signals (bullish candle, volume increase)",
            "Enter when price bounces off support",
            "Place stop below support level",
        ],
    },
    EntryStrategy {
        title: "Breakout Entry",
        description: "Enter as price breaks above resistance with strong volume",
        prices: &[95.0, 98.0, 100.0, 99.0, 101.0, 106.0, 110.0, 112.0],
        entry: EntryMark { x: 6, price: 106.0, label: "Entry on breakout" },
        stop: PriceLevel { price: 99.0, label: "Stop at old resistance" },
        target: PriceLevel { price: 115.0, label: "Measured move target" },
        rules: &[
            "Identify consolidation or resistance level",
            "Wait for volume to expand on breakout",
            "Enter on breakout or on retest of old resistance",
            "Place stop at prior resistance (now support)",
            "Target = breakout point + pattern height",
        ],
    },
    EntryStrategy {
        title: "Trend Reversal Entry",
        description: "Enter after confirmed trend reversal pattern",
        prices: &[120.0, 110.0, 95.0, 90.0, 92.0, 98.0, 105.0, 110.0],
        entry: EntryMark { x: 6, price: 98.0, label: "Entry after double bottom" },
        stop: PriceLevel { price: 88.0, label: "Stop below pattern low" },
        target: PriceLevel { price: 110.0, label: "Target at neckline" },
        rules: &[
            "Wait for complete reversal pattern formation",
            "Confirm with volume and momentum indicators",
            "Enter after neckline break or on retest",
            "Place stop beyond pattern extreme",
            "Initial target at pattern neckline or resistance",
        ],
    },
];

pub const INTRO: &str = "Alan Farley emphasizes that successful swing trading requires \
    systematic rules for both entries and exits. Emotional decisions lead to poor results. \
    Define your entry and exit criteria before the trade and stick to them without exception.";

pub const PROFIT_TAKING: &[&str] = &[
    "Sell 1/3 at first resistance, 1/3 at second, trail final 1/3",
    "Move stop to breakeven at 1R, then trail below recent lows",
    "Exit if target not reached within expected timeframe (3-7 days)",
    "Exit at measured move or Fibonacci extension levels",
    "Exit when momentum indicators show divergence or exhaustion",
];

pub const STOP_EXITS: &[&str] = &[
    "Always use a stop loss order in the market, never mental stops",
    "Exit immediately if pattern is violated (breakdown below support)",
    "Exit if setup fails to trigger within 2-3 days of pattern completion",
    "Exit before major earnings or news if it arrives during your hold period",
    "Exit immediately if you realize your analysis was incorrect",
];

pub const DISCIPLINE: &[&str] = &[
    "Know your entry, stop, and target before placing any order",
    "Execute your predetermined strategy without emotional interference",
    "Take small losses immediately when stop is hit - no hoping or averaging down",
    "Trail stops on profitable trades to capture larger moves",
    "Journal every trade to identify patterns in your behavior and improve",
];
