use std::fmt;

/// Upper bound on the number of rows a LIMIT emits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// No cap on the number of rows
    #[default]
    Unbounded,

    /// Emit at most this many rows
    Bounded(usize),
}

impl Limit {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    pub fn as_bounded(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(n) => Some(n),
        }
    }
}

impl From<usize> for Limit {
    fn from(value: usize) -> Self {
        Self::Bounded(value)
    }
}

impl From<Option<usize>> for Limit {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Self::Unbounded, Self::Bounded)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Bounded(n) => n.fmt(f),
        }
    }
}

/// Effective bounds for one execution of a LIMIT node.
///
/// Produced by [`LimitNode::resolve`](super::LimitNode::resolve) and consumed
/// by the operator that produces rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedLimit {
    /// Maximum number of rows to emit after skipping
    pub limit: Limit,

    /// Number of leading rows to skip
    pub offset: usize,
}

impl ResolvedLimit {
    pub fn new(limit: Limit, offset: usize) -> ResolvedLimit {
        ResolvedLimit { limit, offset }
    }

    pub fn bounded(limit: usize, offset: usize) -> ResolvedLimit {
        ResolvedLimit::new(Limit::Bounded(limit), offset)
    }

    pub fn unbounded(offset: usize) -> ResolvedLimit {
        ResolvedLimit::new(Limit::Unbounded, offset)
    }

    /// Returns true if no row can pass, whatever the input.
    pub fn is_empty_window(&self) -> bool {
        matches!(self.limit, Limit::Bounded(0))
    }

    /// Skips `offset` rows then keeps at most `limit` of the rest, in place.
    pub fn apply<T>(&self, rows: &mut Vec<T>) {
        if self.offset >= rows.len() {
            rows.clear();
        } else {
            rows.drain(..self.offset);
        }

        if let Limit::Bounded(n) = self.limit {
            rows.truncate(n);
        }
    }

    /// Streaming form of [`apply`](Self::apply).
    pub fn window<I>(&self, rows: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let take = self.limit.as_bounded().unwrap_or(usize::MAX);
        rows.into_iter().skip(self.offset).take(take)
    }
}
