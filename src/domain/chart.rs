//! Renderer-independent chart description.
//!
//! Lessons describe their charts as a [`Chart`]; the terminal, SVG and CSV
//! adapters each turn the same value into their own output.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Bars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Key,
    Stop,
    Target,
}

/// Horizontal reference line.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub label: String,
    pub price: f64,
    pub kind: LevelKind,
}

/// Vertical marker at a 1-based bar position.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub style: ChartStyle,
    pub prices: Vec<f64>,
    pub levels: Vec<Level>,
    pub marker: Option<Marker>,
}

impl Chart {
    pub fn line(title: impl Into<String>, prices: &[f64]) -> Self {
        Self {
            title: title.into(),
            style: ChartStyle::Line,
            prices: prices.to_vec(),
            levels: Vec::new(),
            marker: None,
        }
    }

    pub fn bars(title: impl Into<String>, prices: &[f64]) -> Self {
        Self {
            style: ChartStyle::Bars,
            ..Self::line(title, prices)
        }
    }

    pub fn with_level(mut self, label: impl Into<String>, price: f64, kind: LevelKind) -> Self {
        self.levels.push(Level {
            label: label.into(),
            price,
            kind,
        });
        self
    }

    pub fn with_marker(mut self, x: usize, label: impl Into<String>) -> Self {
        self.marker = Some(Marker {
            x,
            label: label.into(),
        });
        self
    }

    /// `(x, price)` pairs with x starting at 1.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.prices.iter().enumerate().map(|(i, &p)| (i + 1, p))
    }

    /// Lowest and highest value across prices and reference levels.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.prices
            .iter()
            .copied()
            .chain(self.levels.iter().map(|l| l.price))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
