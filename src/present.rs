//! Terminal presentation of report lines.
//!
//! A [`Presenter`] decides how lines reach the user. [`Immediate`] writes them
//! straight away; [`Animated`] first runs a purely cosmetic progress bar on
//! stderr. Neither touches the report contents.
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub trait Presenter {
    fn present(&self, lines: &[String], out: &mut dyn Write) -> io::Result<()>;
}

fn write_lines(lines: &[String], out: &mut dyn Write) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Presenter for Immediate {
    fn present(&self, lines: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_lines(lines, out)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Animated {
    tick: Duration,
    hidden: bool,
}

impl Default for Animated {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
            hidden: false,
        }
    }
}

impl Animated {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Run the animation without drawing anything.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    fn progress_bar(&self) -> ProgressBar {
        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let pb = ProgressBar::with_draw_target(Some(100), target);
        let style = ProgressStyle::default_bar()
            .template("[{bar:50}] {percent}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("# ");
        pb.set_style(style);
        pb
    }
}

impl Presenter for Animated {
    fn present(&self, lines: &[String], out: &mut dyn Write) -> io::Result<()> {
        let pb = self.progress_bar();
        for step in 0..=100u64 {
            if !self.tick.is_zero() {
                thread::sleep(self.tick);
            }
            pb.set_position(step);
        }
        pb.finish();
        write_lines(lines, out)
    }
}
