//! Rule document assembly and rendering.
//!
//! The document holds, in order: the default goal, the hand-authored rules
//! verbatim, `all`, every synthesized rule, the phony cleanup, rebuild
//! and spell targets, then `.DELETE_ON_ERROR` so a failed recipe leaves no
//! partial target behind. `default` comes first so that a hand-authored rule
//! never becomes make's default goal.

use crate::graph::{Rule, SynthesisSession};
use crate::spell::SpellCheckGenerator;
use serde::Serialize;
use std::fmt::Write;

pub const PHONY_TARGETS: &[&str] = &["default", "all", "clean", "bare", "scratch", "spell"];

#[derive(Debug, Clone, Serialize)]
pub struct RuleDocument {
    pub handwritten: String,
    pub all: Vec<String>,
    pub rules: Vec<Rule>,
    pub clean: Vec<String>,
    pub bare: Vec<String>,
    pub spell: Vec<String>,
}

impl RuleDocument {
    pub fn from_session(session: &mut SynthesisSession, handwritten: &str) -> Self {
        let spell = SpellCheckGenerator::for_documents(session);
        Self {
            handwritten: handwritten.to_string(),
            all: session.deliverables().to_vec(),
            rules: session.rules().iter().cloned().collect(),
            clean: session.trash().clean().iter().cloned().collect(),
            bare: session.trash().bare().iter().cloned().collect(),
            spell,
        }
    }

    /// Renders the document as a GNU make file.
    pub fn to_makefile(&self) -> String {
        let mut out = String::new();
        out.push_str("default: all\n\n");

        if !self.handwritten.trim().is_empty() {
            out.push_str(self.handwritten.trim_end());
            out.push_str("\n\n");
        }

        write_rule(&mut out, "all", &self.all, &[]);
        for rule in &self.rules {
            write_rule(&mut out, &rule.target, &rule.prerequisites, &rule.recipe);
        }

        write_rule(&mut out, "clean", &[], &remove_command(&self.clean));
        write_rule(&mut out, "bare", &["clean".to_string()], &remove_command(&self.bare));
        write_rule(
            &mut out,
            "scratch",
            &[],
            &[
                "$(MAKE) -f $(firstword $(MAKEFILE_LIST)) bare".to_string(),
                "$(MAKE) -f $(firstword $(MAKEFILE_LIST)) all".to_string(),
            ],
        );
        write_rule(&mut out, "spell", &[], &self.spell);

        out.push_str(".DELETE_ON_ERROR:\n");
        let _ = writeln!(out, ".PHONY: {}", PHONY_TARGETS.join(" "));
        out
    }
}

fn remove_command(files: &[String]) -> Vec<String> {
    if files.is_empty() {
        Vec::new()
    } else {
        vec![format!("rm -f {}", files.join(" "))]
    }
}

fn write_rule(out: &mut String, target: &str, prerequisites: &[String], recipe: &[String]) {
    let _ = write!(out, "{}:", target);
    for prerequisite in prerequisites {
        let _ = write!(out, " {}", prerequisite);
    }
    out.push('\n');
    for command in recipe {
        let _ = writeln!(out, "\t{}", command);
    }
    out.push('\n');
}
