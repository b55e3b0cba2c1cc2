use std::fmt;

/// A context value a template can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    PostType,
    Taxonomy,
    Term,
    NotFound,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "post_type" => Some(Self::PostType),
            "taxonomy" => Some(Self::Taxonomy),
            "term" => Some(Self::Term),
            "404" => Some(Self::NotFound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A sanitized state class pattern, split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTemplate {
    source: String,
    segments: Vec<Segment>,
}

/// Lowercase and drop everything outside `[a-z0-9_%-]`.
pub fn sanitize_state(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '%'))
        .collect()
}

impl StateTemplate {
    /// Sanitize and parse `raw`. Returns `None` if nothing survives sanitizing.
    pub fn parse(raw: &str) -> Option<Self> {
        let source = sanitize_state(raw);
        if source.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source.as_str();

        while let Some(start) = rest.find('%') {
            literal.push_str(&rest[..start]);
            let tail = &rest[start..];
            match placeholder_at(tail) {
                Some((placeholder, len)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                    rest = &tail[len..];
                }
                None => {
                    literal.push('%');
                    rest = &tail[1..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Some(Self { source, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.placeholders().any(|p| p == placeholder)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Fill every placeholder via `value`; `None` if any of them cannot be filled.
    pub fn render<'v>(&self, mut value: impl FnMut(Placeholder) -> Option<&'v str>) -> Option<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(value(*p)?),
            }
        }
        Some(out)
    }
}

impl fmt::Display for StateTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Recognise `%%name%%` or `%name%` at the start of `s`, returning its byte length.
fn placeholder_at(s: &str) -> Option<(Placeholder, usize)> {
    ["%%", "%"].into_iter().find_map(|delim| {
        let inner = s.strip_prefix(delim)?;
        let end = inner.find('%')?;
        let placeholder = Placeholder::from_name(&inner[..end])?;
        inner[end..]
            .starts_with(delim)
            .then_some((placeholder, delim.len() * 2 + end))
    })
}
