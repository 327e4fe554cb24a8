//! Public vs authenticated route classification.
//!
//! Rules are `{pattern, requirement}`. Patterns are absolute paths made of
//! literal segments, `*` (exactly one segment) and a trailing `**` (zero or more
//! segments). Resolution is most-specific-match, so rule order does not matter:
//! more literal segments wins, then a pattern without `**` beats one with it.
//! Equally specific rules that disagree resolve to `Authenticated`, as do
//! unmatched paths and paths with `.`/`..` segments.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// No principal needed.
    Public,
    /// A principal must be present in the security context.
    Authenticated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutePatternError {
    #[error("route pattern is empty")]
    Empty,
    #[error("route pattern must start with '/': {0}")]
    NotAbsolute(String),
    #[error("'**' may only be the last segment: {0}")]
    RestNotLast(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Single,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Specificity {
    literals: usize,
    exact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, RoutePatternError> {
        if raw.is_empty() {
            return Err(RoutePatternError::Empty);
        }
        if !raw.starts_with('/') {
            return Err(RoutePatternError::NotAbsolute(raw.to_owned()));
        }

        let parts: Vec<&str> = split_path(raw).collect();
        let last = parts.len().saturating_sub(1);
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| match *part {
                "**" if i == last => Ok(Segment::Rest),
                "**" => Err(RoutePatternError::RestNotLast(raw.to_owned())),
                "*" => Ok(Segment::Single),
                lit => Ok(Segment::Literal(lit.to_owned())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn matches(&self, path: &[&str]) -> bool {
        let mut rest = path;
        for seg in &self.segments {
            match seg {
                Segment::Rest => return true,
                Segment::Single => match rest.split_first() {
                    Some((_, tail)) => rest = tail,
                    None => return false,
                },
                Segment::Literal(lit) => match rest.split_first() {
                    Some((head, tail)) if *head == lit.as_str() => rest = tail,
                    _ => return false,
                },
            }
        }
        rest.is_empty()
    }

    fn specificity(&self) -> Specificity {
        Specificity {
            literals: self
                .segments
                .iter()
                .filter(|s| matches!(s, Segment::Literal(_)))
                .count(),
            exact: !self.segments.contains(&Segment::Rest),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pattern: PathPattern,
    requirement: AuthRequirement,
}

impl RouteRule {
    pub fn public(pattern: &str) -> Result<Self, RoutePatternError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            requirement: AuthRequirement::Public,
        })
    }

    pub fn authenticated(pattern: &str) -> Result<Self, RoutePatternError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            requirement: AuthRequirement::Authenticated,
        })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn requirement(&self) -> AuthRequirement {
        self.requirement
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    rules: Vec<RouteRule>,
}

impl RoutePolicy {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The given patterns are public; everything else (`/**`) needs a principal.
    pub fn with_public_paths<I, S>(patterns: I) -> Result<Self, RoutePatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = patterns
            .into_iter()
            .map(|p| RouteRule::public(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        rules.push(RouteRule::authenticated("/**")?);

        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn resolve(&self, path: &str) -> AuthRequirement {
        let segments: Vec<&str> = split_path(path).collect();
        if segments.iter().any(|s| *s == "." || *s == "..") {
            return AuthRequirement::Authenticated;
        }

        let mut best: Option<(Specificity, AuthRequirement)> = None;
        for rule in self.rules.iter().filter(|r| r.pattern.matches(&segments)) {
            let spec = rule.pattern.specificity();
            best = match best {
                None => Some((spec, rule.requirement)),
                Some((current, _)) if spec > current => Some((spec, rule.requirement)),
                Some((current, req)) if spec == current && req != rule.requirement => {
                    Some((current, AuthRequirement::Authenticated))
                }
                keep => keep,
            };
        }

        best.map(|(_, req)| req)
            .unwrap_or(AuthRequirement::Authenticated)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
