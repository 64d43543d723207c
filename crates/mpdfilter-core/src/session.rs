use std::time::{Duration, Instant};

use crate::domain::{Clause, Operator};
use crate::error::CoreError;
use crate::expr::{segments, serialize, RenderOptions};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Crumbs to show for a stored expression.
///
/// The trailing segment is still being edited when the input box holds text,
/// so it only becomes a crumb when `input_is_empty`.
pub fn crumbs_for_display(expression: &str, input_is_empty: bool) -> Vec<Clause> {
    let mut parsed = segments(expression);
    if !input_is_empty {
        parsed.pop();
    }
    parsed.into_iter().flatten().collect()
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    crumbs: Vec<Clause>,
    tag: String,
    operator: Operator,
    input: String,
    options: RenderOptions,
}

impl SearchSession {
    pub fn new(
        tag: impl Into<String>,
        operator: impl Into<Operator>,
        options: RenderOptions,
    ) -> Self {
        Self {
            crumbs: Vec::new(),
            tag: tag.into(),
            operator: operator.into(),
            input: String::new(),
            options,
        }
    }

    pub fn crumbs(&self) -> &[Clause] {
        &self.crumbs
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn select_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn select_operator(&mut self, operator: impl Into<Operator>) {
        self.operator = operator.into();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// The clause currently being typed.
    pub fn pending(&self) -> Clause {
        Clause::new(self.tag.clone(), self.operator.clone(), self.input.clone())
    }

    pub fn expression(&self) -> String {
        serialize(&self.crumbs, Some(&self.pending()), &self.options)
    }

    /// Replaces the crumbs with those of a stored expression.
    ///
    /// An empty expression also clears the input.
    pub fn restore(&mut self, expression: &str) {
        self.crumbs = crumbs_for_display(expression, self.input.is_empty());
        if expression.is_empty() {
            self.input.clear();
        }
    }

    /// Turns the pending input into a crumb. Returns false when there was no
    /// input to commit.
    pub fn commit(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        let clause = self.pending();
        self.crumbs.push(clause);
        self.input.clear();
        true
    }

    pub fn remove(&mut self, index: usize) -> Result<Clause, CoreError> {
        self.check_index(index)?;
        Ok(self.crumbs.remove(index))
    }

    /// Removes a crumb and makes it the pending clause again.
    pub fn edit(&mut self, index: usize) -> Result<(), CoreError> {
        let (tag, operator, value) = self.remove(index)?.into_parts();
        self.tag = tag;
        self.operator = operator;
        self.input = value;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index >= self.crumbs.len() {
            return Err(CoreError::CrumbOutOfRange {
                index,
                len: self.crumbs.len(),
            });
        }
        Ok(())
    }
}

/// Trailing-edge debounce driven by caller-supplied instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the debounce, replacing any earlier deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the debounce fires, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once per arming, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
