//! Context paths for locating values in nested structures.
//!
//! This module provides [`Context`] and [`Segment`] types for building and
//! representing the location of a value inside the structure being validated.
//! Combinators extend the context as they descend: a descriptor name, then a
//! key or index, then a nested descriptor name, and so on.

use std::fmt::{self, Display};

/// A segment of a validation context path.
///
/// Segments are either names (descriptor names and object keys) or array
/// indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A descriptor name or object key (e.g. `Array<number>`, `email`)
    Name(String),
    /// An array or tuple index (e.g. `0`, `42`)
    Index(usize),
}

impl Segment {
    /// Creates a new name segment.
    pub fn name(name: impl Into<String>) -> Self {
        Segment::Name(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name),
            Segment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// The location of a value inside the structure being validated.
///
/// `Context` is an ordered sequence of segments with read-only extension
/// semantics: `push_name` and `push_index` return new contexts, so sibling
/// branches of a validation never observe each other's segments.
///
/// # Example
///
/// ```rust
/// use typegate::Context;
///
/// let ctx = Context::root()
///     .push_name("Array<number>")
///     .push_index(1);
///
/// assert_eq!(ctx.to_string(), "Array<number> / 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context {
    segments: Vec<Segment>,
}

impl Context {
    /// Creates an empty context representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new context with a name segment appended.
    ///
    /// This method does not modify the original context; it returns a new one.
    pub fn push_name(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Name(name.into()));
        Self { segments }
    }

    /// Returns a new context with an index segment appended.
    ///
    /// This method does not modify the original context; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root context (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this context.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this context has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the parent context (all segments except the last), or None if
    /// this is the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is the root.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " / ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
