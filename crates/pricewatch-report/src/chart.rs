//! Deviation / percentile scatter chart, rendered to SVG with plotters.

use plotters::coord::Shift;
use plotters::prelude::*;
use pricewatch_analysis::ScatterSeries;
use pricewatch_core::errors::ReportError;

const LIGHT_GREY: RGBColor = RGBColor(211, 211, 211);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const POINT_SIZE: i32 = 4;
pub const OPPORTUNITY_LABEL: &str = "Opportunity zone";

/// Render `series` as an SVG document of `size` pixels.
///
/// Flagged points are red and drawn last, the rest light grey. A vertical
/// line marks the deviation threshold and a horizontal one the percentile
/// threshold. An arrowed label points into the opportunity zone, the
/// high-deviation low-percentile corner.
pub fn render_scatter_svg(series: &ScatterSeries, size: (u32, u32)) -> Result<String, ReportError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root, series).map_err(|e| ReportError::Chart(e.to_string()))?;
        root.present()
            .map_err(|e| ReportError::Chart(e.to_string()))?;
    }
    Ok(svg)
}

type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

fn draw(root: &DrawingArea<SVGBackend<'_>, Shift>, series: &ScatterSeries) -> DrawResult {
    root.fill(&WHITE)?;

    let ((x_min, x_max), (y_min, y_max)) = series.bounds().unwrap_or((
        (series.deviation_threshold - 10.0, series.deviation_threshold + 10.0),
        (0.0, 100.0),
    ));
    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let (x_lo, x_hi) = (x_min - x_pad, x_max + x_pad);
    let (y_lo, y_hi) = (y_min.min(0.0), y_max.max(100.0));

    let mut chart = ChartBuilder::on(root)
        .caption("Price deviation vs sales percentile", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart
        .configure_mesh()
        .x_desc("Price deviation (%)")
        .y_desc("Sales percentile (%)")
        .draw()?;

    for flagged in [false, true] {
        let color = if flagged { RED.mix(0.6) } else { LIGHT_GREY.mix(0.6) };
        chart.draw_series(
            series
                .points
                .iter()
                .filter(|p| p.flagged == flagged)
                .map(|p| Circle::new((p.deviation_pct, p.sales_percentile), POINT_SIZE, color.filled())),
        )?;
    }

    let dev = series.deviation_threshold;
    let pct = series.percentile_threshold;
    chart.draw_series(LineSeries::new([(dev, y_lo), (dev, y_hi)], ORANGE.stroke_width(1)))?;
    chart.draw_series(LineSeries::new([(x_lo, pct), (x_hi, pct)], ORANGE.stroke_width(1)))?;

    // (30, 10) with the label at (40, 5) under the default thresholds.
    let (target, label) = opportunity_anchor(dev, pct);
    chart.draw_series(std::iter::once(PathElement::new(vec![label, target], RED.stroke_width(2))))?;
    chart.draw_series(std::iter::once(TriangleMarker::new(target, 5, RED.filled())))?;
    chart.draw_series(std::iter::once(Text::new(
        OPPORTUNITY_LABEL,
        label,
        ("sans-serif", 14).into_font().color(&RED),
    )))?;
    Ok(())
}

/// Arrow tip and label position for the opportunity-zone annotation.
fn opportunity_anchor(deviation_threshold: f64, percentile_threshold: f64) -> ((f64, f64), (f64, f64)) {
    let target = (deviation_threshold * 2.0, percentile_threshold * 0.4);
    let label = (target.0 + 10.0, percentile_threshold * 0.2);
    (target, label)
}

#[cfg(test)]
mod tests {
    use pricewatch_analysis::ScatterPoint;

    use super::*;

    fn series() -> ScatterSeries {
        ScatterSeries {
            points: vec![
                ScatterPoint {
                    deviation_pct: 50.0,
                    sales_percentile: 20.0,
                    flagged: true,
                },
                ScatterPoint {
                    deviation_pct: -5.0,
                    sales_percentile: 80.0,
                    flagged: false,
                },
            ],
            deviation_threshold: 15.0,
            percentile_threshold: 25.0,
            omitted: 0,
        }
    }

    #[test]
    fn renders_svg_document() {
        let svg = render_scatter_svg(&series(), (800, 600)).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("circle"));
    }

    #[test]
    fn opportunity_zone_is_annotated() {
        let svg = render_scatter_svg(&series(), (800, 600)).unwrap();
        assert!(svg.contains(OPPORTUNITY_LABEL));
        assert_eq!(opportunity_anchor(15.0, 25.0), ((30.0, 10.0), (40.0, 5.0)));
    }

    #[test]
    fn empty_series_still_renders() {
        let svg = render_scatter_svg(&ScatterSeries::default(), (400, 300)).unwrap();
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_scatter_svg(&series(), (800, 600)).unwrap();
        let b = render_scatter_svg(&series(), (800, 600)).unwrap();
        assert_eq!(a, b);
    }
}
