//! Step-by-step playback of a finished calculation
//!
//! Next / Previous / Finish / Cancel only move an index; the step list is
//! never modified once produced.

use crate::step::StepRecord;

#[derive(Debug, Clone, Default)]
pub struct Playback {
    steps: Vec<StepRecord>,
    position: usize,
}

impl Playback {
    pub fn new(steps: Vec<StepRecord>) -> Self {
        Playback { steps, position: 0 }
    }

    pub fn current(&self) -> Option<&StepRecord> {
        self.steps.get(self.position)
    }

    /// Advance one step. `None` when already on the last step.
    pub fn next(&mut self) -> Option<&StepRecord> {
        if self.position + 1 >= self.steps.len() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Go back one step. `None` when already on the first step.
    pub fn previous(&mut self) -> Option<&StepRecord> {
        if self.position == 0 || self.steps.is_empty() {
            return None;
        }
        self.position -= 1;
        self.current()
    }

    /// Jump to the last step
    pub fn finish(&mut self) -> Option<&StepRecord> {
        self.position = self.steps.len().saturating_sub(1);
        self.current()
    }

    /// Drop the steps
    pub fn cancel(&mut self) {
        self.steps.clear();
        self.position = 0;
    }

    /// Zero-based index of the current step
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position + 1 >= self.steps.len()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// The current step and every step after it
    pub fn remaining(&self) -> &[StepRecord] {
        self.steps.get(self.position..).unwrap_or(&[])
    }
}
