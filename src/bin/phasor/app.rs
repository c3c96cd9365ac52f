//! Application state and event loop

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::f64::consts::PI;
use std::time::Duration;

use phasor_lab::{
    scene::{Demo, Evaluation, SceneParams, Window},
    PhasorError,
};

use super::ui;

/// Parameters the arrow keys can move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Amplitude,
    Fundamental,
    Phase,
    Window,
    Frequency,
    TimeStamp,
    PulseWidth,
}

impl Param {
    pub const ALL: [Param; 7] = [
        Param::Amplitude,
        Param::Fundamental,
        Param::Phase,
        Param::Window,
        Param::Frequency,
        Param::TimeStamp,
        Param::PulseWidth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Param::Amplitude => "a",
            Param::Fundamental => "f0 [Hz]",
            Param::Phase => "phi [rad]",
            Param::Window => "window",
            Param::Frequency => "f [Hz]",
            Param::TimeStamp => "time stamp [s]",
            Param::PulseWidth => "pulse width [s]",
        }
    }

    fn shift(self, by: isize) -> Self {
        let n = Self::ALL.len() as isize;
        let i = Self::ALL.iter().position(|&p| p == self).unwrap_or(0) as isize;
        Self::ALL[(i + by).rem_euclid(n) as usize]
    }
}

/// Explorer state: current demo, its parameters and the latest evaluation
pub struct App {
    pub demo: Demo,
    pub params: SceneParams,
    pub selected: Param,
    pub evaluation: Result<Evaluation, PhasorError>,
    should_quit: bool,
}

impl App {
    pub fn new(demo: Demo) -> Self {
        let params = demo.params();
        Self {
            demo,
            params,
            selected: Param::Frequency,
            evaluation: params.evaluate(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab | KeyCode::Down => self.selected = self.selected.shift(1),
            KeyCode::BackTab | KeyCode::Up => self.selected = self.selected.shift(-1),
            KeyCode::Right => self.nudge(1.0),
            KeyCode::Left => self.nudge(-1.0),
            KeyCode::Char('w') => self.params.waveform = self.params.waveform.next(),
            KeyCode::Char('n') => self.params.normalization = self.params.normalization.next(),
            KeyCode::Char('d') => self.load(next_demo(self.demo)),
            KeyCode::Char('r') => self.load(self.demo),
            _ => return,
        }
        self.refresh();
    }

    fn load(&mut self, demo: Demo) {
        self.demo = demo;
        self.params = demo.params();
    }

    /// Move the selected parameter one step, clamped to its slider range.
    fn nudge(&mut self, direction: f64) {
        let p = &mut self.params;
        match self.selected {
            Param::Amplitude => p.amplitude = step(p.amplitude, 0.1 * direction, 0.5, 2.0),
            Param::Fundamental => p.fundamental = step(p.fundamental, direction, 0.0, 5.0),
            Param::Phase => p.phase = step(p.phase, PI / 12.0 * direction, -PI, PI),
            Param::Frequency => {
                p.analysis_frequency = step(p.analysis_frequency, direction, -5.0, 5.0)
            }
            Param::TimeStamp => {
                let span = window_seconds(p);
                p.time_stamp = step(p.time_stamp, span / 100.0 * direction, 0.0, span);
            }
            Param::Window => {
                p.window = match p.window {
                    Window::Duration(d) => Window::Duration(step(d, 0.5 * direction, 0.5, 5.0)),
                    Window::Periods(n) => {
                        Window::Periods((n as f64 + direction).clamp(1.0, 5.0) as u32)
                    }
                };
            }
            Param::PulseWidth => {
                let factor = if direction > 0.0 { 2.0 } else { 0.5 };
                p.pulse_width = (p.pulse_width * factor).clamp(0.001, 0.5);
            }
        }
    }

    fn refresh(&mut self) {
        self.evaluation = self.params.evaluate();
        if let Err(err) = &self.evaluation {
            tracing::warn!(%err, "scene rejected");
        }
    }

    /// Whether the pulse width parameter applies to the current waveform.
    pub fn uses_pulse(&self) -> bool {
        !self.params.waveform.is_periodic()
    }
}

fn step(value: f64, delta: f64, min: f64, max: f64) -> f64 {
    let next = (value + delta).clamp(min, max);
    // Snap accumulated float drift back onto the step grid.
    (next * 1e9).round() / 1e9
}

fn window_seconds(params: &SceneParams) -> f64 {
    match params.window {
        Window::Duration(d) => d,
        Window::Periods(n) if params.fundamental != 0.0 => n as f64 / params.fundamental.abs(),
        Window::Periods(_) => 0.0,
    }
}

fn next_demo(demo: Demo) -> Demo {
    let i = Demo::ALL.iter().position(|&d| d == demo).unwrap_or(0);
    Demo::ALL[(i + 1) % Demo::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasor_lab::dsp::WaveformKind;

    #[test]
    fn nudges_stay_in_range() {
        let mut app = App::new(Demo::MeasuringFrequency);
        app.selected = Param::Frequency;
        for _ in 0..20 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.params.analysis_frequency, 5.0);
        assert!(app.evaluation.is_ok());
    }

    #[test]
    fn zero_fundamental_is_reachable_and_evaluates() {
        let mut app = App::new(Demo::MeasuringFrequency);
        app.params.waveform = WaveformKind::Square;
        app.selected = Param::Fundamental;
        app.handle_key(KeyCode::Left);
        assert_eq!(app.params.fundamental, 0.0);
        assert!(app.evaluation.is_ok());
    }

    #[test]
    fn demos_cycle_and_reset() {
        let mut app = App::new(Demo::MeasuringFrequency);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.demo, Demo::SinglePeriod);
        app.selected = Param::Phase;
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.params, Demo::SinglePeriod.params());
    }
}
