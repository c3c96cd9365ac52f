//! Product with the phasor, real and imaginary parts against time

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use phasor_lab::scene::Evaluation;

use super::{decimate, symmetric_bound, CG_COLOR, MAX_PLOT_POINTS, STAMP_COLOR};

/// Render Re/Im of x(t)·e^{-j2πft}, the running scalar product and the CG level
pub fn render_product(frame: &mut Frame, area: Rect, eval: &Evaluation) {
    let block = Block::default()
        .title(format!(
            " x(t)·e^(-j2π·{}·t)  re/im ",
            eval.correlation.frequency
        ))
        .borders(Borders::ALL);

    let times: Vec<f64> = eval.grid.times().collect();
    let product = eval.correlation.product.as_slice();
    let running = eval.correlation.running().unwrap_or_else(|err| {
        tracing::warn!(%err, "skipping running product trace");
        Vec::new()
    });

    let re: Vec<(f64, f64)> = times.iter().zip(product).map(|(&t, z)| (t, z.re)).collect();
    let im: Vec<(f64, f64)> = times.iter().zip(product).map(|(&t, z)| (t, z.im)).collect();
    let run: Vec<(f64, f64)> = times.iter().zip(&running).map(|(&t, z)| (t, z.re)).collect();
    let re = decimate(&re, MAX_PLOT_POINTS);
    let im = decimate(&im, MAX_PLOT_POINTS);
    let run = decimate(&run, MAX_PLOT_POINTS);

    let t0 = eval.grid.t_start();
    let t1 = t0 + eval.grid.duration();
    let cg = eval.correlation.scalar;
    let cg_re = [(t0, cg.re()), (t1, cg.re())];
    let cg_im = [(t0, cg.im()), (t1, cg.im())];
    let h = eval.highlight;
    let stamp = [(h.stamp.time, h.product.re), (h.stamp.time, h.product.im)];

    let peak = product
        .iter()
        .fold(cg.magnitude(), |m, z| m.max(z.re.abs()).max(z.im.abs()));
    let y = symmetric_bound(peak, 1.0);

    let datasets = vec![
        Dataset::default()
            .name("re")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&re),
        Dataset::default()
            .name("im")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&im),
        Dataset::default()
            .name("running re")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&run),
        Dataset::default()
            .name("CG")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CG_COLOR))
            .data(&cg_re),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CG_COLOR))
            .data(&cg_im),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(STAMP_COLOR))
            .data(&stamp),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([t0, t1])
                .labels(vec![format!("{t0:.1}"), format!("{t1:.1} s")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-y, y])
                .labels(vec![format!("{:.1}", -y), format!("{y:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
