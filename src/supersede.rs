//! Last-write-wins guard for asynchronous renders
//!
//! When a slider or a fetch triggers several renders into the same target,
//! only the most recently started one may land. Each render takes a ticket
//! from [`LatestOnly::begin`] and checks it with [`LatestOnly::accept`]
//! before writing; stale results are dropped, never merged.

/// Generation counter for one UI target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestOnly {
    generation: u32,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new render and return its ticket
    pub fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// True if `ticket` belongs to the newest render
    pub fn accept(&self, ticket: u32) -> bool {
        ticket == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_render_supersedes_older() {
        let mut gate = LatestOnly::new();
        let first = gate.begin();
        let second = gate.begin();
        assert!(!gate.accept(first));
        assert!(gate.accept(second));
    }

    #[test]
    fn test_single_render_is_accepted() {
        let mut gate = LatestOnly::new();
        let ticket = gate.begin();
        assert!(gate.accept(ticket));
        assert!(gate.accept(ticket));
    }

    #[test]
    fn test_fresh_gate_rejects_unissued_ticket() {
        let gate = LatestOnly::new();
        assert!(!gate.accept(1));
    }
}
