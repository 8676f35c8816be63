use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use crate::error::HwError;
use scale_traits::LineSource;

enum Step {
    Line(String),
    Pause(Duration),
}

/// Replays a fixed script of lines, then behaves like a silent port:
/// each further read sleeps for its timeout and fails with `ReadTimeout`.
///
/// Pauses let tests phase the stream against the acquisition deadline.
pub struct ScriptedLines {
    steps: VecDeque<Step>,
}

impl ScriptedLines {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }

    pub fn line(mut self, s: impl Into<String>) -> Self {
        self.steps.push_back(Step::Line(s.into()));
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for s in lines {
            self.steps.push_back(Step::Line(s.into()));
        }
        self
    }

    pub fn pause(mut self, d: Duration) -> Self {
        self.steps.push_back(Step::Pause(d));
        self
    }
}

impl Default for ScriptedLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        while let Some(step) = self.steps.pop_front() {
            match step {
                Step::Pause(d) => thread::sleep(d),
                Step::Line(s) => return Ok(s),
            }
        }
        thread::sleep(timeout);
        Err(Box::new(HwError::ReadTimeout))
    }
}
