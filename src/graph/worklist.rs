use std::collections::HashSet;

/// Pending target names. A name is accepted at most once per run, which is
/// what makes synthesis terminate on cyclic references.
#[derive(Debug, Default)]
pub struct Worklist {
    visited: HashSet<String>,
    pending: Vec<String>,
}

impl Worklist {
    /// Returns false if `name` was seen before.
    pub fn enqueue(&mut self, name: &str) -> bool {
        if name.is_empty() || !self.visited.insert(name.to_string()) {
            return false;
        }
        self.pending.push(name.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop()
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.visited.contains(name)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}
