//! Complex-plane view of the product
//!
//! The product curve, the unit circle traced by the phasor, the highlighted
//! instant and the center of gravity of the curve.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use phasor_lab::scene::Evaluation;

use super::{decimate, symmetric_bound, CG_COLOR, MAX_PLOT_POINTS, STAMP_COLOR};

/// Render the product in the complex plane
pub fn render_plane(frame: &mut Frame, area: Rect, eval: &Evaluation) {
    let block = Block::default()
        .title(" complex plane ")
        .borders(Borders::ALL);

    let product = eval.correlation.product.as_slice();
    let curve: Vec<(f64, f64)> = product.iter().map(|z| (z.re, z.im)).collect();
    let curve = decimate(&curve, MAX_PLOT_POINTS);
    let circle: Vec<(f64, f64)> = eval.phasor.iter().map(|z| (z.re, z.im)).collect();
    let circle = decimate(&circle, MAX_PLOT_POINTS / 3);

    let h = eval.highlight;
    let stamp = [(h.product.re, h.product.im)];
    let phasor = [(h.phasor.re, h.phasor.im)];
    let cg = eval.correlation.scalar;
    let center = [(cg.re(), cg.im())];

    let peak = product.iter().fold(cg.magnitude(), |m, z| m.max(z.norm()));
    let r = symmetric_bound(peak, 1.1);

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&circle),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&curve),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&phasor),
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
                .title("re")
                .bounds([-r, r])
                .labels(vec![format!("{:.1}", -r), format!("{r:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .title("im")
                .bounds([-r, r])
                .labels(vec![format!("{:.1}", -r), format!("{r:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
