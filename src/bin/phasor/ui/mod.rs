//! TUI rendering for the phasor explorer
//!
//! Four plots share one time stamp: the signal over time, the product
//! with the phasor over time, and the same product in the complex plane
//! and in polar form.

mod plane;
mod polar;
mod product;
mod readout;
mod signal;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use plane::render_plane;
use polar::render_polar;
use product::render_product;
use readout::render_readout;
use signal::render_signal;

/// Upper bound on points handed to a chart dataset
const MAX_PLOT_POINTS: usize = 1_500;

/// Highlight color shared by the time stamp markers on every plot
const STAMP_COLOR: Color = Color::Yellow;
/// Color of the center of gravity (scalar product)
const CG_COLOR: Color = Color::Green;

/// Render the whole UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: signal, products, readout, help
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30), // Signal
            Constraint::Min(10),        // Product plots
            Constraint::Length(7),      // Parameters and results
            Constraint::Length(1),      // Help bar
        ])
        .split(area);

    let plots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    match &app.evaluation {
        Ok(eval) => {
            render_signal(frame, rows[0], eval);
            render_product(frame, plots[0], eval);
            render_plane(frame, plots[1], eval);
            render_polar(frame, plots[2], eval);
        }
        Err(err) => {
            let message = Paragraph::new(format!(" {err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title(" Invalid parameters ").borders(Borders::ALL));
            frame.render_widget(message, rows[0]);
        }
    }

    render_readout(frame, rows[2], app);

    let help = Paragraph::new(
        " [Tab/↑↓] Select  [←→] Adjust  [W] Waveform  [N] Normalization  [D] Next demo  [R] Reset  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[3]);
}

/// Keep at most `max` evenly spaced items.
fn decimate<T: Copy>(items: &[T], max: usize) -> Vec<T> {
    if items.len() <= max || max == 0 {
        return items.to_vec();
    }
    let stride = items.len().div_ceil(max);
    items.iter().step_by(stride).copied().collect()
}

/// Symmetric axis bound covering `peak`, never smaller than `floor`.
fn symmetric_bound(peak: f64, floor: f64) -> f64 {
    if peak.is_finite() {
        (peak * 1.1).max(floor)
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimate_bounds_point_count() {
        let items: Vec<usize> = (0..20_000).collect();
        let kept = decimate(&items, MAX_PLOT_POINTS);
        assert!(kept.len() <= MAX_PLOT_POINTS);
        assert_eq!(kept[0], 0);
        assert_eq!(decimate(&items[..10], MAX_PLOT_POINTS).len(), 10);
    }

    #[test]
    fn symmetric_bound_has_floor() {
        assert_eq!(symmetric_bound(0.1, 1.0), 1.0);
        assert!((symmetric_bound(10.0, 1.0) - 11.0).abs() < 1e-12);
        assert_eq!(symmetric_bound(f64::NAN, 2.0), 2.0);
    }
}
