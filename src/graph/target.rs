use std::fmt;

/// Artifact kind inferred from a target's extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Document,
    Dvi,
    Ps,
    Pdf,
    /// `.ps.gz`, the only two-part extension.
    PsGz,
    Style,
    VectorImage,
    Bitmap,
    Other(String),
    None,
}

impl ArtifactKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "tex" => ArtifactKind::Document,
            "dvi" => ArtifactKind::Dvi,
            "ps" => ArtifactKind::Ps,
            "pdf" => ArtifactKind::Pdf,
            "ps.gz" => ArtifactKind::PsGz,
            "sty" => ArtifactKind::Style,
            "eps" => ArtifactKind::VectorImage,
            "png" => ArtifactKind::Bitmap,
            "" => ArtifactKind::None,
            other => ArtifactKind::Other(other.to_string()),
        }
    }

    pub fn is_document_output(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Dvi | ArtifactKind::Ps | ArtifactKind::Pdf | ArtifactKind::PsGz
        )
    }
}

/// A file name pending resolution, split into root and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub root: String,
    pub extension: String,
    pub kind: ArtifactKind,
}

impl Target {
    pub fn parse(name: &str) -> Self {
        let (root, extension) = split_name(name);
        Self {
            name: name.to_string(),
            root: root.to_string(),
            extension: extension.to_string(),
            kind: ArtifactKind::from_extension(extension),
        }
    }

    /// Same root, different extension: `paper.dvi` -> `paper.tex`.
    pub fn sibling(&self, extension: &str) -> String {
        format!("{}.{}", self.root, extension)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn split_name(name: &str) -> (&str, &str) {
    if let Some(root) = name.strip_suffix(".ps.gz") {
        return (root, "ps.gz");
    }

    let file_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    match name[file_start..].rfind('.') {
        Some(0) | None => (name, ""),
        Some(dot) => (&name[..file_start + dot], &name[file_start + dot + 1..]),
    }
}
