//! Skip ahead to the next question that still needs a reminder.
//!
//! Questions are delivered in order from a stored index. Some may already
//! have been answered out of band; this walks forward past them with an
//! explicit, bounded loop.

use std::collections::HashSet;
use std::hash::Hash;

/// Where the cursor ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// `index` points at an unanswered question.
    Ready { index: usize },
    /// Every question at or after the start was answered; `index` is the list length.
    Exhausted { index: usize },
    /// `max_steps` answered questions were skipped without reaching an open
    /// one. Resume from `index` on the next call.
    StepLimit { index: usize },
}

impl CursorStep {
    pub fn index(&self) -> usize {
        match *self {
            CursorStep::Ready { index }
            | CursorStep::Exhausted { index }
            | CursorStep::StepLimit { index } => index,
        }
    }
}

/// Advance from `current` to the first question id not in `answered`.
///
/// At most `max_steps` answered questions are skipped per call.
pub fn next_unanswered<T: Eq + Hash>(
    question_ids: &[T],
    current: usize,
    answered: &HashSet<T>,
    max_steps: usize,
) -> CursorStep {
    let mut index = current;
    let mut skipped = 0;

    while index < question_ids.len() {
        if !answered.contains(&question_ids[index]) {
            return CursorStep::Ready { index };
        }
        if skipped == max_steps {
            return CursorStep::StepLimit { index };
        }
        skipped += 1;
        index += 1;
    }

    CursorStep::Exhausted {
        index: question_ids.len(),
    }
}
