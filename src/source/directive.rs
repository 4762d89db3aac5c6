//! In-source directives.
//!
//! A directive occupies one physical line: optional indentation, an optional
//! `//` or `#` leader for non-TeX sources, then `%%name` and a free-form
//! argument (an optional `:` after the name is ignored).
//!
//! ```text
//! %%depend logo.eps
//! %%nodepend draft
//! // %%viafig
//! %%DVIPSFLAGS: -t a4 -Ppdf
//! ```

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Depend(String),
    NoDepend(String),
    Package(String),
    Ignore,
    NoSpell,
    LatexOpts(String),
    DotOpts(String),
    ViaFig,
    DvipsFlags(String),
}

impl Directive {
    fn from_parts(name: &str, arg: &str) -> Option<Self> {
        // Only the rasterizer override is case-insensitive.
        if name.eq_ignore_ascii_case("dvipsflags") {
            return Some(Directive::DvipsFlags(arg.to_string()));
        }

        let non_empty = |arg: &str| (!arg.is_empty()).then(|| arg.to_string());
        match name {
            "depend" => non_empty(arg).map(Directive::Depend),
            "nodepend" => non_empty(arg).map(Directive::NoDepend),
            "package" => non_empty(arg).map(Directive::Package),
            "ignore" => Some(Directive::Ignore),
            "nospell" => Some(Directive::NoSpell),
            "latexopts" => non_empty(arg).map(Directive::LatexOpts),
            "dotopts" => non_empty(arg).map(Directive::DotOpts),
            "viafig" => Some(Directive::ViaFig),
            _ => None,
        }
    }
}

/// All directives of one source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(Vec<Directive>);

impl Directives {
    pub fn parse(text: &str) -> Self {
        let re = Regex::new(r"(?m)^[ \t]*(?:/{2,}|#+)?[ \t]*%%([A-Za-z]+)[ \t]*:?(.*)$")
            .expect("valid regex");

        let directives = re
            .captures_iter(text)
            .filter_map(|cap| {
                let name = cap.get(1)?.as_str();
                let arg = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                Directive::from_parts(name, arg)
            })
            .collect();

        Self(directives)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.0.iter()
    }

    pub fn depends(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|d| match d {
            Directive::Depend(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn nodepends(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|d| match d {
            Directive::NoDepend(pattern) => Some(pattern.as_str()),
            _ => None,
        })
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|d| match d {
            Directive::Package(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn is_ignored(&self) -> bool {
        self.0.contains(&Directive::Ignore)
    }

    pub fn suppresses_spell(&self) -> bool {
        self.0.contains(&Directive::NoSpell)
    }

    pub fn via_fig(&self) -> bool {
        self.0.contains(&Directive::ViaFig)
    }

    /// Compiler options from every `%%latexopts` line, space-joined.
    pub fn latex_opts(&self) -> Option<String> {
        let opts: Vec<&str> = self
            .0
            .iter()
            .filter_map(|d| match d {
                Directive::LatexOpts(opts) => Some(opts.as_str()),
                _ => None,
            })
            .collect();
        (!opts.is_empty()).then(|| opts.join(" "))
    }

    pub fn dot_opts(&self) -> Option<&str> {
        self.0.iter().find_map(|d| match d {
            Directive::DotOpts(opts) => Some(opts.as_str()),
            _ => None,
        })
    }

    /// The first `%%dvipsflags` line wins.
    pub fn dvips_flags(&self) -> Option<&str> {
        self.0.iter().find_map(|d| match d {
            Directive::DvipsFlags(flags) => Some(flags.as_str()),
            _ => None,
        })
    }
}
