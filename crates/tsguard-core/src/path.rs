//! # Validation Path
//!
//! Breadcrumb trail from the root of a validated value down to the node
//! currently being checked. Rendered as the root marker `@` followed by
//! `.["key"]` for object descent and `.[i]` for array descent:
//!
//! ```text
//! @.["items"].[2].["price"]
//! ```

use std::fmt;

/// A single step of descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descent into an object field.
    Key(String),
    /// Descent into an array element.
    Index(usize),
}

/// Ordered sequence of segments from the root.
///
/// A path lives for one top-level validation call; the matcher pushes a
/// segment before recursing and pops it on the way back out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// Marker printed for the root of the value.
    pub const ROOT_MARKER: &'static str = "@";

    /// An empty path pointing at the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a copy of this path extended by `segment`.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut next = self.clone();
        next.segments.push(segment);
        next
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::ROOT_MARKER)?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    // Keys are quoted and escaped as JSON strings.
                    write!(f, ".[{}]", serde_json::Value::String(key.clone()))?
                }
                PathSegment::Index(i) => write!(f, ".[{i}]")?,
            }
        }
        Ok(())
    }
}
