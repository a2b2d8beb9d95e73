//! Pass/fail reporting for harness test cases.

use heapless::Vec;

use crate::sequencer::CheckError;

/// Result of one named test case.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Name the test case reports under.
    pub name: &'static str,
    /// What the run produced.
    pub result: Result<(), CheckError>,
}

impl Outcome {
    pub fn new(name: &'static str, result: Result<(), CheckError>) -> Self {
        Self { name, result }
    }

    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// Diagnostic for a failed case, `None` if it passed.
    pub fn reason(&self) -> Option<&'static str> {
        self.result.err().map(|e| e.reason())
    }
}

#[cfg(feature = "defmt-log")]
impl defmt::Format for Outcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self.result {
            Ok(()) => defmt::write!(fmt, "{=str}: pass", self.name),
            Err(e) => defmt::write!(fmt, "{=str}: FAIL ({=str})", self.name, e.reason()),
        }
    }
}

/// Fixed-capacity collection of test outcomes.
///
/// The target has no allocator, so the suite holds at most `N`
/// outcomes. The suite keeps going after a failed case; a failure is
/// recorded, not propagated.
pub struct Suite<const N: usize> {
    name: &'static str,
    outcomes: Vec<Outcome, N>,
}

impl<const N: usize> Suite<N> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            outcomes: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Record one outcome. Hands it back if the suite is full.
    pub fn record(&mut self, outcome: Outcome) -> Result<(), Outcome> {
        self.outcomes.push(outcome)
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
