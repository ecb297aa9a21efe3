//! SVG rendering of lesson charts for the web pages and `chart --format svg`.


use crate::adapters::format::price;
use crate::domain::chart::{Chart, ChartStyle, LevelKind};

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 240.0;
const PADDING: f64 = 40.0;

const LINE_COLOR: &str = "#2563eb";
const BAR_COLOR: &str = "#60a5fa";
const MARKER_COLOR: &str = "#7c3aed";

fn level_color(kind: LevelKind) -> &'static str {
    match kind {
        LevelKind::Key => "#6b7280",
        LevelKind::Stop => "#dc2626",
        LevelKind::Target => "#16a34a",
    }
}

/// Escapes text for use in SVG element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

struct Scale {
    lo: f64,
    span: f64,
    step: f64,
}

impl Scale {
    fn new(chart: &Chart, lo: f64, hi: f64) -> Self {
        let pad = ((hi - lo) * 0.1).max(1.0);
        let count = chart.prices.len();
        let plot_width = WIDTH - 2.0 * PADDING;
        let step = match chart.style {
            ChartStyle::Line if count > 1 => plot_width / (count - 1) as f64,
            ChartStyle::Line => 0.0,
            ChartStyle::Bars => plot_width / count.max(1) as f64,
        };
        Self {
            lo: lo - pad,
            span: hi - lo + 2.0 * pad,
            step,
        }
    }

    fn y(&self, value: f64) -> f64 {
        HEIGHT - PADDING - (value - self.lo) / self.span * (HEIGHT - 2.0 * PADDING)
    }

    /// Centre of the point at 1-based position `x`.
    fn x(&self, position: usize, style: ChartStyle) -> f64 {
        let i = position.saturating_sub(1) as f64;
        match style {
            ChartStyle::Line => PADDING + i * self.step,
            ChartStyle::Bars => PADDING + (i + 0.5) * self.step,
        }
    }
}

pub fn render_svg(chart: &Chart) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}" width="{WIDTH:.0}" height="{HEIGHT:.0}" role="img" aria-label="{title}">"#,
        title = escape(&chart.title)
    );
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="20" text-anchor="middle" font-size="14" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        escape(&chart.title)
    ));

    let Some((lo, hi)) = chart.value_range() else {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">No data</text></svg>"#,
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        return svg;
    };
    let scale = Scale::new(chart, lo, hi);

    svg.push_str(&format!(
        r##"<line x1="{p:.0}" y1="{top:.0}" x2="{p:.0}" y2="{bottom:.0}" stroke="#9ca3af"/><line x1="{p:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="#9ca3af"/>"##,
        p = PADDING,
        top = PADDING,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING
    ));

    match chart.style {
        ChartStyle::Line => {
            let points: Vec<String> = chart
                .points()
                .map(|(x, v)| format!("{:.1},{:.1}", scale.x(x, chart.style), scale.y(v)))
                .collect();
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="2" points="{}"/>"#,
                points.join(" ")
            ));
        }
        ChartStyle::Bars => {
            let bar_width = scale.step * 0.6;
            let floor = HEIGHT - PADDING;
            for (x, v) in chart.points() {
                let top = scale.y(v);
                svg.push_str(&format!(
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{BAR_COLOR}"><title>{}</title></rect>"#,
                    scale.x(x, chart.style) - bar_width / 2.0,
                    top,
                    bar_width,
                    (floor - top).max(0.0),
                    price(v)
                ));
            }
        }
    }

    for level in &chart.levels {
        let y = scale.y(level.price);
        let color = level_color(level.kind);
        svg.push_str(&format!(
            r#"<line class="level" x1="{:.0}" y1="{y:.1}" x2="{:.0}" y2="{y:.1}" stroke="{color}" stroke-dasharray="5,5"/><text x="{:.0}" y="{:.1}" font-size="11" fill="{color}" text-anchor="end">{} {}</text>"#,
            PADDING,
            WIDTH - PADDING,
            WIDTH - PADDING,
            y - 4.0,
            escape(&level.label),
            price(level.price)
        ));
    }

    if let Some(marker) = &chart.marker {
        if let Some(&value) = marker.x.checked_sub(1).and_then(|i| chart.prices.get(i)) {
            let cx = scale.x(marker.x, chart.style);
            let cy = scale.y(value);
            svg.push_str(&format!(
                r#"<circle class="marker" cx="{cx:.1}" cy="{cy:.1}" r="6" fill="{MARKER_COLOR}"/><text x="{cx:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="{MARKER_COLOR}">{}</text>"#,
                cy - 10.0,
                escape(&marker.label)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}
