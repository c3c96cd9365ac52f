//! Time-domain view of the signal

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use phasor_lab::scene::Evaluation;

use super::{decimate, symmetric_bound, MAX_PLOT_POINTS, STAMP_COLOR};

/// Render x(t) with the time stamp marker
pub fn render_signal(frame: &mut Frame, area: Rect, eval: &Evaluation) {
    let title = format!(
        " x(t): {} over {:.2} s ",
        eval.params.waveform.name(),
        eval.grid.duration()
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let data = decimate(&eval.signal_points(), MAX_PLOT_POINTS);
    let stamp = [(eval.highlight.stamp.time, eval.highlight.signal)];

    let peak = eval.signal.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    let y = symmetric_bound(peak, 1.0);
    let t0 = eval.grid.t_start();
    let t1 = t0 + eval.grid.duration();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
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
