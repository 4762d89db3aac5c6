use regex::Regex;

/// Presentation classes that typeset in landscape without saying so.
const LANDSCAPE_CLASSES: &[&str] = &["slides", "seminar", "foils", "prosper", "powerdot"];

/// Classes that set their own page size; dvips must not be given one.
const OWN_PAGE_SIZE_CLASSES: &[&str] = &["prosper"];

/// A parsed `\documentclass[options]{name}` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentClass {
    pub name: String,
    pub options: Vec<String>,
}

impl DocumentClass {
    /// Finds the first class declaration in `content` (comment-stripped text).
    pub fn parse(content: &str) -> Option<Self> {
        let re = Regex::new(r"\\documentclass\s*(?:\[([^\]]*)\])?\s*\{([^}]*)\}")
            .expect("valid regex");
        let cap = re.captures(content)?;

        let options = cap
            .get(1)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name: cap.get(2)?.as_str().trim().to_string(),
            options,
        })
    }

    /// Returns true if `content` declares a document class at all.
    pub fn is_declared_in(content: &str) -> bool {
        content.contains("\\documentclass")
    }

    pub fn is_landscape(&self) -> bool {
        self.options.iter().any(|o| o == "landscape")
            || LANDSCAPE_CLASSES.contains(&self.name.as_str())
    }

    pub fn sets_own_page_size(&self) -> bool {
        OWN_PAGE_SIZE_CLASSES.contains(&self.name.as_str())
    }
}
