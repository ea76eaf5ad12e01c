//! Substitution rules and the ordered rule sets built from them.

use std::{borrow::Cow, fmt, path::Path, str::FromStr};

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// File name suffixes rewritten when no others are configured.
pub const DEFAULT_SUFFIXES: &[&str] = &[".ts", ".tsx"];

/// Path marker of the control application subtree.
pub const CONTROL_MARKER: &str = "apps/control";

/// Built-in rule sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Only the three base alias rules.
    Base,
    /// Base rules, plus admin path flattening under `apps/control`.
    #[default]
    Control,
    /// Base rules, plus quote normalisation of every `@/components/` import.
    Components,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Control, Preset::Components, Preset::Base];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Base => "base",
            Preset::Control => "control",
            Preset::Components => "components",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// A single regex substitution over a whole file buffer.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl Rule {
    pub fn new(name: impl Into<String>, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| Error::Pattern {
            rule: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Rewrites `from "<from><rest>";` into `from "<to><rest>";`.
    ///
    /// Either quote style is accepted, the output is always double-quoted.
    /// `<rest>` stops at the closing quote and never crosses a line break.
    pub fn alias(from: &str, to: &str) -> Result<Self> {
        let pattern = format!(
            r#"\b(?P<lead>from\s+)['"]{}(?P<rest>[^'"\n]*)['"];"#,
            regex::escape(from)
        );
        let replacement = format!(r#"${{lead}}"{}${{rest}}";"#, to.replace('$', "$$"));
        Self::new(format!("{from} -> {to}"), &pattern, replacement)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the rule to `text`.
    ///
    /// Returns the new text and the number of matches whose replacement
    /// differs from the matched text, or `None` if nothing changed.
    pub fn apply(&self, text: &str) -> Option<(String, usize)> {
        let mut changed = 0;
        let output = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let mut dst = String::new();
            caps.expand(&self.replacement, &mut dst);
            if dst != caps[0] {
                changed += 1;
            }
            dst
        });
        match output {
            Cow::Owned(output) if changed > 0 => Some((output, changed)),
            _ => None,
        }
    }
}

/// Rules that only apply to files whose directory path contains `marker`.
///
/// A scope without a marker applies everywhere.
#[derive(Debug, Clone)]
pub struct Scope {
    marker: Option<String>,
    rules: Vec<Rule>,
}

impl Scope {
    pub fn new(marker: Option<String>, rules: Vec<Rule>) -> Self {
        Self { marker, rules }
    }

    pub fn everywhere(rules: Vec<Rule>) -> Self {
        Self::new(None, rules)
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        let Some(marker) = &self.marker else {
            return true;
        };
        let dir = path.parent().unwrap_or(path);
        dir.to_string_lossy().replace('\\', "/").contains(marker.as_str())
    }
}

/// The outcome of running a [`RuleSet`] over one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    pub replacements: usize,
}

/// Base rules followed by scoped rules, applied as a pipeline.
#[derive(Debug, Clone)]
pub struct RuleSet {
    base: Vec<Rule>,
    scopes: Vec<Scope>,
    suffixes: Vec<String>,
}

impl RuleSet {
    pub fn new(base: Vec<Rule>, scopes: Vec<Scope>) -> Self {
        Self {
            base,
            scopes,
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn preset(preset: Preset) -> Result<Self> {
        let base = vec![
            Rule::alias("@/lib/", "@lib/")?,
            Rule::alias("@/components/ui/", "@ui/")?,
            Rule::alias("@/types/", "@types/")?,
        ];
        let scopes = match preset {
            Preset::Base => vec![],
            Preset::Control => vec![Scope::new(
                Some(CONTROL_MARKER.to_string()),
                vec![
                    Rule::alias("@/app/admin/(protected)/", "@/app/(protected)/")?,
                    Rule::alias("@/components/admin/", "@/components/")?,
                ],
            )],
            Preset::Components => vec![Scope::everywhere(vec![Rule::alias(
                "@/components/",
                "@/components/",
            )?])],
        };
        Ok(Self::new(base, scopes))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Whether the file name ends in one of the recognized suffixes.
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
    }

    /// The rules that apply to `path`, in application order.
    pub fn rules_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Rule> + 'a {
        self.base.iter().chain(
            self.scopes
                .iter()
                .filter(move |scope| scope.applies_to(path))
                .flat_map(|scope| scope.rules.iter()),
        )
    }

    /// Runs every applicable rule over `content`, each on the previous output.
    ///
    /// Returns `None` when the final text equals the input.
    pub fn rewrite(&self, path: &Path, content: &str) -> Option<Rewritten> {
        let mut current = Cow::Borrowed(content);
        let mut replacements = 0;
        for rule in self.rules_for(path) {
            if let Some((next, count)) = rule.apply(&current) {
                tracing::trace!(rule = rule.name(), count, "rule matched");
                replacements += count;
                current = Cow::Owned(next);
            }
        }
        match current {
            Cow::Owned(output) if output != content => Some(Rewritten {
                content: output,
                replacements,
            }),
            _ => None,
        }
    }
}
