use serde::Serialize;
use std::collections::HashSet;

/// One target, what it needs, and the commands that make it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub target: String,
    pub prerequisites: Vec<String>,
    pub recipe: Vec<String>,
}

impl Rule {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            prerequisites: Vec::new(),
            recipe: Vec::new(),
        }
    }

    /// Adds prerequisites, skipping ones already listed.
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prerequisite in prerequisites {
            let prerequisite = prerequisite.into();
            if !self.prerequisites.contains(&prerequisite) {
                self.prerequisites.push(prerequisite);
            }
        }
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.recipe.push(command.into());
        self
    }
}

/// Rules in resolution order. The first rule for a target wins.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    targets: HashSet<String>,
}

impl RuleSet {
    /// Returns false, leaving the set unchanged, if `rule.target` already has a rule.
    pub fn insert(&mut self, rule: Rule) -> bool {
        if !self.targets.insert(rule.target.clone()) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn get(&self, target: &str) -> Option<&Rule> {
        if !self.targets.contains(target) {
            return None;
        }
        self.rules.iter().find(|r| r.target == target)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.targets.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
