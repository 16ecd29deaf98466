// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Path addressing into element trees.
//!
//! A path is a sequence of steps, rendered `.field` for record/variant names
//! and `[index]` for array slots, e.g. `.spatial.position[1]`.

use std::fmt;

/// One step into a nested element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    /// Array slot index.
    Index(usize),
    /// Record field or variant alternative name.
    Field(String),
}

impl PathStep {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathStep {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "[{}]", i),
            Self::Field(name) => write!(f, ".{}", name),
        }
    }
}

/// An ordered list of steps; the empty path addresses the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, step: PathStep) {
        self.0.push(step);
    }

    /// Copy with one more step, for building paths during traversal.
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    /// Parse the `Display` form. Malformed input (a dangling `.`, an
    /// unterminated or non-numeric `[...]`, text outside a step) yields the
    /// root path.
    pub fn parse(text: &str) -> Self {
        let mut steps = Vec::new();
        let mut chars = text.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            match c {
                '.' => {
                    chars.next();
                    let name_start = start + 1;
                    let mut name_end = name_start;
                    while let Some(&(i, c)) = chars.peek() {
                        if c == '.' || c == '[' {
                            break;
                        }
                        name_end = i + c.len_utf8();
                        chars.next();
                    }
                    if name_end == name_start {
                        return Self::root();
                    }
                    steps.push(PathStep::Field(text[name_start..name_end].to_string()));
                }
                '[' => {
                    chars.next();
                    let mut digits = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(c);
                    }
                    if !closed {
                        return Self::root();
                    }
                    match digits.parse::<usize>() {
                        Ok(index) => steps.push(PathStep::Index(index)),
                        Err(_) => return Self::root(),
                    }
                }
                _ => return Self::root(),
            }
        }
        Self(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let path = Path::new(vec![
            PathStep::field("spatial"),
            PathStep::field("position"),
            PathStep::Index(1),
        ]);
        let text = path.to_string();
        assert_eq!(text, ".spatial.position[1]");
        assert_eq!(Path::parse(&text), path);
    }

    #[test]
    fn test_parse_root_and_index_first() {
        assert!(Path::parse("").is_root());
        assert_eq!(
            Path::parse("[3].x"),
            Path::new(vec![PathStep::Index(3), PathStep::field("x")])
        );
    }

    #[test]
    fn test_parse_malformed_yields_root() {
        assert!(Path::parse(".").is_root());
        assert!(Path::parse(".a.").is_root());
        assert!(Path::parse("[12").is_root());
        assert!(Path::parse("[x]").is_root());
        assert!(Path::parse("abc").is_root());
    }

    #[test]
    fn test_ordering_indexes_before_fields() {
        let a = Path::new(vec![PathStep::Index(2)]);
        let b = Path::new(vec![PathStep::field("a")]);
        assert!(a < b);

        let mut paths = vec![b.clone(), a.clone(), Path::root()];
        paths.sort();
        assert_eq!(paths, vec![Path::root(), a, b]);
    }

    #[test]
    fn test_child_extends_without_mutating() {
        let base = Path::new(vec![PathStep::field("pos")]);
        let extended = base.child(PathStep::Index(1));
        assert_eq!(base.len(), 1);
        assert_eq!(extended.to_string(), ".pos[1]");
    }
}
