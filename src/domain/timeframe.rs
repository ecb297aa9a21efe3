//! Multiple-timeframe scenarios.
//!
//! Each scenario shows the same market on the weekly, daily and 4-hour
//! charts. Prices are generated once from a seeded generator so a given
//! seed always reproduces the same bars.

use std::fmt;

use rand::Rng;

use crate::domain::chart::Chart;

/// Bars generated per timeframe chart.
pub const POINTS_PER_CHART: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Neutral => "neutral",
        }
    }
}

/// Charts in top-down analysis order: weekly first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Weekly,
    Daily,
    FourHour,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Weekly, Timeframe::Daily, Timeframe::FourHour];

    pub fn name(&self) -> &'static str {
        match self {
            Timeframe::Weekly => "Weekly",
            Timeframe::Daily => "Daily",
            Timeframe::FourHour => "4-Hour",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Timeframe::Weekly => "shows overall trend and major support/resistance",
            Timeframe::Daily => "identifies swing opportunities within the trend",
            Timeframe::FourHour => "times precise entry and exit points",
        }
    }

    pub fn parse(s: &str) -> Option<Timeframe> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "w" => Some(Timeframe::Weekly),
            "daily" | "d" => Some(Timeframe::Daily),
            "4h" | "4-hour" | "fourhour" | "four_hour" => Some(Timeframe::FourHour),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
    EarlyReversal,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::Neutral => "neutral",
            Signal::EarlyReversal => "early-reversal",
        })
    }
}

/// Derives the trade signal from the trend on each timeframe.
pub fn classify(weekly: Trend, daily: Trend, four_hour: Trend) -> Signal {
    match (weekly, daily, four_hour) {
        (Trend::Up, Trend::Up, Trend::Up) => Signal::Bullish,
        (Trend::Down, Trend::Down, Trend::Down) => Signal::Bearish,
        (Trend::Down, Trend::Down, Trend::Up) | (Trend::Up, Trend::Up, Trend::Down) => {
            Signal::EarlyReversal
        }
        _ => Signal::Neutral,
    }
}

/// Generates `points` prices trending from `start` toward `end`.
///
/// Directional trends get a jitter of `(u - 0.3) * 5`; neutral prices
/// oscillate around `start` by `(u - 0.5) * 10`. Values are rounded.
pub fn generate_trend_prices<R: Rng + ?Sized>(
    rng: &mut R,
    points: usize,
    start: f64,
    end: f64,
    trend: Trend,
) -> Vec<f64> {
    let steps = points.saturating_sub(1).max(1) as f64;
    (0..points)
        .map(|i| {
            let u: f64 = rng.gen_range(0.0..1.0);
            let value = match trend {
                Trend::Up | Trend::Down => {
                    start + (end - start) * i as f64 / steps + (u - 0.3) * 5.0
                }
                Trend::Neutral => start + (u - 0.5) * 10.0,
            };
            value.round()
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct TrendSpec {
    pub trend: Trend,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug)]
pub struct ScenarioSpec {
    pub title: &'static str,
    pub weekly: TrendSpec,
    pub daily: TrendSpec,
    pub four_hour: TrendSpec,
    pub signal: Signal,
    pub description: &'static str,
    pub action: &'static str,
}

impl ScenarioSpec {
    pub fn trend_spec(&self, timeframe: Timeframe) -> TrendSpec {
        match timeframe {
            Timeframe::Weekly => self.weekly,
            Timeframe::Daily => self.daily,
            Timeframe::FourHour => self.four_hour,
        }
    }
}

const fn spec(trend: Trend, start: f64, end: f64) -> TrendSpec {
    TrendSpec { trend, start, end }
}

pub const SCENARIOS: &[ScenarioSpec] = &[
    ScenarioSpec {
        title: "Strong Alignment - Best Setup",
        weekly: spec(Trend::Up, 90.0, 135.0),
        daily: spec(Trend::Up, 100.0, 130.0),
        four_hour: spec(Trend::Up, 120.0, 135.0),
        signal: Signal::Bullish,
        description: "All timeframes showing uptrend - highest probability long setup",
        action: "Look for pullbacks to support on 4H chart for entry",
    },
    ScenarioSpec {
        title: "Conflicting Signals - Caution",
        weekly: spec(Trend::Neutral, 110.0, 115.0),
        daily: spec(Trend::Up, 100.0, 125.0),
        four_hour: spec(Trend::Down, 125.0, 110.0),
        signal: Signal::Neutral,
        description: "Mixed signals across timeframes - wait for alignment",
        action: "Stay on sidelines or reduce position size significantly",
    },
    ScenarioSpec {
        title: "Trend Reversal Setup",
        weekly: spec(Trend::Down, 130.0, 90.0),
        daily: spec(Trend::Down, 120.0, 95.0),
        four_hour: spec(Trend::Up, 95.0, 105.0),
        signal: Signal::EarlyReversal,
        description: "Short-term reversal against longer-term downtrend",
        action: "Counter-trend trade - requires tight stops and quick profit-taking",
    },
];

#[derive(Debug, Clone)]
pub struct TimeframeChart {
    pub timeframe: Timeframe,
    pub trend: Trend,
    pub prices: Vec<f64>,
}

impl TimeframeChart {
    pub fn chart(&self) -> Chart {
        Chart::bars(
            format!("{} Chart ({})", self.timeframe.name(), self.trend.label()),
            &self.prices,
        )
    }
}

/// A scenario with its generated bars.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub spec: &'static ScenarioSpec,
    pub charts: Vec<TimeframeChart>,
}

impl Scenario {
    pub fn generate<R: Rng + ?Sized>(spec: &'static ScenarioSpec, rng: &mut R) -> Self {
        let charts = Timeframe::ALL
            .into_iter()
            .map(|timeframe| {
                let t = spec.trend_spec(timeframe);
                TimeframeChart {
                    timeframe,
                    trend: t.trend,
                    prices: generate_trend_prices(rng, POINTS_PER_CHART, t.start, t.end, t.trend),
                }
            })
            .collect();
        Self { spec, charts }
    }

    pub fn chart_for(&self, timeframe: Timeframe) -> Option<&TimeframeChart> {
        self.charts.iter().find(|c| c.timeframe == timeframe)
    }

    pub fn classify(&self) -> Signal {
        classify(
            self.spec.weekly.trend,
            self.spec.daily.trend,
            self.spec.four_hour.trend,
        )
    }

    /// All timeframes agree on a direction.
    pub fn is_power_zone(&self) -> bool {
        matches!(self.classify(), Signal::Bullish | Signal::Bearish)
    }
}

pub const INTRO: &str = "Alan Farley teaches that successful swing traders must analyze three \
    timeframes simultaneously. This \"3D\" approach reveals the complete market picture and \
    helps identify high-probability setups.";

pub const INSIGHTS: &[(&str, &str)] = &[
    (
        "Trend Alignment",
        "Best trades occur when all timeframes point in the same direction. This creates \
         \"power zones\" with highest probability of success.",
    ),
    (
        "Entry Timing",
        "Use the shortest timeframe for precise entry after longer timeframes confirm the \
         trend. Enter on pullbacks to support in uptrends.",
    ),
    (
        "Conflict Management",
        "When timeframes conflict, either wait for alignment or reduce position size. Never \
         force trades with mixed signals.",
    ),
    (
        "Stop Placement",
        "Set stops based on the entry timeframe, but profit targets should respect resistance \
         levels on higher timeframes.",
    ),
    (
        "Pattern Confirmation",
        "A pattern on the daily chart has more significance if it aligns with weekly \
         support/resistance levels.",
    ),
];

pub const CHECKLIST: &[&str] = &[
    "Check weekly chart first - identify the primary trend and key S/R levels",
    "Move to daily chart - look for patterns and setups aligned with weekly trend",
    "Drop to 4-hour chart - time your entry on pullbacks or breakouts",
    "Set stop loss based on 4H chart, but check it doesn't violate daily support",
    "Set profit target at daily/weekly resistance levels for optimal exit",
];
