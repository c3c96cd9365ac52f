//! Parameter list and numeric results

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use phasor_lab::scene::Window;

use crate::app::{App, Param};
use super::CG_COLOR;

/// Render the parameter panel and the scalar product readout
pub fn render_readout(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_params(frame, columns[0], app);
    render_results(frame, columns[1], app);
}

fn render_params(frame: &mut Frame, area: Rect, app: &App) {
    let p = &app.params;
    let values: Vec<(Param, String)> = Param::ALL
        .iter()
        .filter(|&&param| param != Param::PulseWidth || app.uses_pulse())
        .map(|&param| {
            let value = match param {
                Param::Amplitude => format!("{:.1}", p.amplitude),
                Param::Fundamental => format!("{:.0}", p.fundamental),
                Param::Phase => format!("{:+.3}", p.phase),
                Param::Window => match p.window {
                    Window::Duration(d) => format!("{d:.1} s"),
                    Window::Periods(n) => format!("{n} period(s)"),
                },
                Param::Frequency => format!("{:+.0}", p.analysis_frequency),
                Param::TimeStamp => format!("{:.3}", p.time_stamp),
                Param::PulseWidth => format!("{:.3}", p.pulse_width),
            };
            (param, value)
        })
        .collect();

    // Two parameters per line keeps the panel short.
    let lines: Vec<Line> = values
        .chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for (param, value) in pair {
                let style = if *param == app.selected {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {} = {value} ", param.label()), style));
                spans.push(Span::raw("  "));
            }
            Line::from(spans)
        })
        .collect();

    let title = format!(
        " {}  [{} | {}] ",
        app.demo.title(),
        p.waveform.name(),
        app.params.normalization().name()
    );
    let panel = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" scalar product ").borders(Borders::ALL);

    let lines = match &app.evaluation {
        Ok(eval) => {
            let cg = eval.correlation.scalar;
            let polar = eval.scalar_polar();
            let h = eval.highlight;
            vec![
                Line::from(Span::styled(
                    format!(
                        " <x, e^(j2πft)> = {:+.4} {:+.4}j",
                        cg.re(),
                        cg.im()
                    ),
                    Style::default().fg(CG_COLOR).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    " |CG| = {:.4}   arg = {:+.4} rad",
                    polar.magnitude, polar.argument
                )),
                Line::from(format!(
                    " t[{}] = {:.4} s   x = {:+.4}",
                    h.stamp.index, h.stamp.time, h.signal
                )),
                Line::from(format!(
                    " product = {:+.4} {:+.4}j   |p| = {:.4}   arg = {:+.4} rad",
                    h.product.re, h.product.im, h.product_polar.magnitude, h.product_polar.argument
                )),
            ]
        }
        Err(err) => vec![Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
