use serde::Serialize;

/// Which construct a dependency was discovered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyOrigin {
    Graphic,
    Listing,
    NestedDocument,
    LegacyFigure,
    BibliographyStyle,
    DeclaredDepend,
    DeclaredPackage,
    Package,
    BibliographyDatabase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub origin: DependencyOrigin,
}

/// Dependencies in discovery order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyList(Vec<Dependency>);

impl DependencyList {
    pub fn push(&mut self, name: impl Into<String>, origin: DependencyOrigin) {
        self.0.push(Dependency {
            name: name.into(),
            origin,
        });
    }

    pub fn extend(&mut self, other: DependencyList) {
        self.0.extend(other.0);
    }

    /// Drops every dependency whose name contains `pattern`. Returns how
    /// many were removed.
    pub fn remove_matching(&mut self, pattern: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|d| !d.name.contains(pattern));
        before - self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|d| d.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.0.iter()
    }

    pub fn has_origin(&self, origin: DependencyOrigin) -> bool {
        self.0.iter().any(|d| d.origin == origin)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
