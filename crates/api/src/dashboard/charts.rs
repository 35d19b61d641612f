//! Inline SVG bar charts.

use std::fmt::Write;

use super::html::escape;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 400.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const GRID_LINES: usize = 4;

const BAR_COLOR: &str = "#ff4b4b";
const BACKGROUND: &str = "#2d2d2d";
const GRID_COLOR: &str = "#404040";
const TEXT_COLOR: &str = "#ffffff";

/// Render a single-series bar chart.
///
/// `format_value` labels each bar and the y-axis ticks. Negative values
/// are drawn as zero-height bars.
pub fn bar_chart(title: &str, bars: &[(String, f64)], format_value: fn(f64) -> String) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let max = bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);
    // Headroom for the value labels above the tallest bar.
    let scale_max = if max > 0.0 { max * 1.15 } else { 1.0 };

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{title}" xmlns="http://www.w3.org/2000/svg">"#,
        title = escape(title),
    );
    let _ = write!(
        svg,
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="{BACKGROUND}"/>"#
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="30" fill="{TEXT_COLOR}" font-size="16" text-anchor="middle">{title}</text>"#,
        x = WIDTH / 2.0,
        title = escape(title),
    );

    for i in 0..=GRID_LINES {
        let fraction = i as f64 / GRID_LINES as f64;
        let y = baseline - fraction * plot_h;
        let _ = write!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="{GRID_COLOR}"/>"#,
            x2 = WIDTH - MARGIN_RIGHT,
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{ty:.1}" fill="{TEXT_COLOR}" font-size="11" text-anchor="end">{label}</text>"#,
            x = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = escape(&format_value(fraction * scale_max)),
        );
    }

    if !bars.is_empty() {
        let slot = plot_w / bars.len() as f64;
        let bar_w = slot * 0.6;

        for (i, (label, value)) in bars.iter().enumerate() {
            let h = (value.max(0.0) / scale_max) * plot_h;
            let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
            let center = x + bar_w / 2.0;

            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{BAR_COLOR}"/>"#,
                y = baseline - h,
            );
            let _ = write!(
                svg,
                r#"<text x="{center:.1}" y="{y:.1}" fill="{TEXT_COLOR}" font-size="12" text-anchor="middle">{text}</text>"#,
                y = baseline - h - 6.0,
                text = escape(&format_value(*value)),
            );
            let _ = write!(
                svg,
                r#"<text x="{center:.1}" y="{y:.1}" fill="{TEXT_COLOR}" font-size="12" text-anchor="middle">{label}</text>"#,
                y = baseline + 20.0,
                label = escape(label),
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent(v: f64) -> String {
        format!("{v:.2}%")
    }

    #[test]
    fn renders_one_bar_per_entry_with_labels() {
        let svg = bar_chart(
            "Engagement Rate by Post Type",
            &[("Images".to_string(), 1.5), ("Carousels".to_string(), 2.62)],
            percent,
        );

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(&format!(r#"fill="{BAR_COLOR}""#)).count(), 2);
        assert!(svg.contains(">2.62%<"));
        assert!(svg.contains(">Carousels<"));
        assert!(svg.contains("Engagement Rate by Post Type"));
    }

    #[test]
    fn escapes_labels() {
        let svg = bar_chart("t", &[("<b>".to_string(), 1.0)], percent);
        assert!(svg.contains("&lt;b&gt;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn empty_and_zero_series_render_without_bars() {
        let svg = bar_chart("t", &[], percent);
        assert_eq!(svg.matches(&format!(r#"fill="{BAR_COLOR}""#)).count(), 0);

        let svg = bar_chart("t", &[("Zero".to_string(), 0.0)], percent);
        assert!(svg.contains(r#"height="0.0""#));
    }
}
