//! Polar view of the product
//!
//! The product unrolled into (argument, magnitude): the radius follows
//! |x(t)| while the argument sweeps at -f and jumps by π wherever x(t)
//! changes sign.

use std::f64::consts::PI;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use phasor_lab::dsp::Polar;
use phasor_lab::scene::Evaluation;

use super::{decimate, CG_COLOR, MAX_PLOT_POINTS, STAMP_COLOR};

/// Render the product's argument against its magnitude
pub fn render_polar(frame: &mut Frame, area: Rect, eval: &Evaluation) {
    let block = Block::default()
        .title(" polar  |z| vs arg z ")
        .borders(Borders::ALL);

    let trace = eval.product_polar();
    let points = polar_points(&trace);
    let points = decimate(&points, MAX_PLOT_POINTS);

    let h = eval.highlight.product_polar;
    let stamp = [(h.argument, h.magnitude)];
    let cg = eval.scalar_polar();
    let center = [(cg.argument, cg.magnitude)];

    let peak = trace
        .iter()
        .fold(cg.magnitude, |m, p| m.max(p.magnitude));
    let r = if peak.is_finite() && peak > 0.0 {
        peak * 1.1
    } else {
        1.0
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(STAMP_COLOR))
            .data(&stamp),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(CG_COLOR))
            .data(&center),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("arg")
                .bounds([-PI, PI])
                .labels(vec!["-π".to_string(), "0".to_string(), "π".to_string()])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .title("|z|")
                .bounds([0.0, r])
                .labels(vec!["0".to_string(), format!("{r:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

/// `(argument, magnitude)` pairs for a scatter plot.
fn polar_points(trace: &[Polar]) -> Vec<(f64, f64)> {
    trace.iter().map(|p| (p.argument, p.magnitude)).collect()
}
