//! Deterministic entity ordering.
//!
//! An [`OrderingChain`] composes an ordered list of comparison criteria into
//! a single total order over an entity type. Criteria are evaluated left to
//! right; the first non-equal result decides. When every criterion ties, the
//! entity's permanent numeric identifier breaks the tie, so no two distinct
//! entities ever compare equal — the order is strict and suitable for
//! ordered-set semantics and repeatable test assertions.
//!
//! Each criterion carries its own direction, and optional criteria carry
//! their own null policy; adding, removing, or reordering criteria never
//! touches the identity tie-break or the null handling of the other
//! criteria. Chains are assembled once, are immutable afterwards, and are
//! safe to share across threads.
//!
//! ```
//! use labarchive::ordering::{Direction, OrderingChain};
//!
//! struct Row {
//!     id: u64,
//!     name: String,
//! }
//!
//! let chain = OrderingChain::new(|row: &Row| row.id)
//!     .key("name", |row: &Row| row.name.clone(), Direction::Ascending);
//!
//! let mut rows = vec![
//!     Row { id: 2, name: "b".to_string() },
//!     Row { id: 1, name: "a".to_string() },
//! ];
//! chain.sort(&mut rows);
//! assert_eq!(rows[0].id, 1);
//! ```

pub mod chains;

use std::cmp::Ordering;
use std::fmt;

/// Direction of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}

impl Direction {
    /// Applies the direction to a natural-order comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Placement of entities whose key is absent, relative to those with a key.
///
/// The policy is explicit per criterion and independent of the criterion's
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Entities without the key sort before entities with it.
    First,
    /// Entities without the key sort after entities with it.
    Last,
}

impl NullPolicy {
    /// Compares a present key (left) against an absent key (right).
    const fn present_versus_absent(self) -> Ordering {
        match self {
            Self::First => Ordering::Greater,
            Self::Last => Ordering::Less,
        }
    }
}

/// One comparison criterion of a chain.
struct Criterion<T> {
    name: &'static str,
    compare: Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

/// A composed, total, null-safe multi-criterion comparator.
///
/// See the module documentation for the comparison algorithm.
pub struct OrderingChain<T> {
    criteria: Vec<Criterion<T>>,
    identity: Box<dyn Fn(&T) -> u64 + Send + Sync>,
}

impl<T> OrderingChain<T> {
    /// Creates a chain with no criteria beyond the identity tie-break.
    ///
    /// `identity` must return the entity's permanent unique identifier; it
    /// guarantees the total order and is always evaluated last.
    #[must_use]
    pub fn new(identity: impl Fn(&T) -> u64 + Send + Sync + 'static) -> Self {
        Self {
            criteria: Vec::new(),
            identity: Box::new(identity),
        }
    }

    /// Appends a criterion over a key that is always present.
    #[must_use]
    pub fn key<K, F>(mut self, name: &'static str, extract: F, direction: Direction) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.criteria.push(Criterion {
            name,
            compare: Box::new(move |a, b| direction.apply(extract(a).cmp(&extract(b)))),
        });
        self
    }

    /// Appends a criterion over a key that may be absent.
    ///
    /// Two present keys compare per `direction`; a present key against an
    /// absent one per `null_policy`; two absent keys tie and fall through to
    /// the next criterion.
    #[must_use]
    pub fn optional_key<K, F>(
        mut self,
        name: &'static str,
        extract: F,
        direction: Direction,
        null_policy: NullPolicy,
    ) -> Self
    where
        K: Ord,
        F: Fn(&T) -> Option<K> + Send + Sync + 'static,
    {
        self.criteria.push(Criterion {
            name,
            compare: Box::new(move |a, b| match (extract(a), extract(b)) {
                (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
                (Some(_), None) => null_policy.present_versus_absent(),
                (None, Some(_)) => null_policy.present_versus_absent().reverse(),
                (None, None) => Ordering::Equal,
            }),
        });
        self
    }

    /// Compares two entities.
    ///
    /// Returns [`Ordering::Equal`] only when `a` and `b` are the same entity.
    #[must_use]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        if std::ptr::eq(a, b) {
            return Ordering::Equal;
        }
        for criterion in &self.criteria {
            let ordering = (criterion.compare)(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        (self.identity)(a).cmp(&(self.identity)(b))
    }

    /// Compares two optional slots; the absent side sorts strictly last.
    #[must_use]
    pub fn compare_options(&self, a: Option<&T>, b: Option<&T>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.compare(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Sorts a slice in place by this chain.
    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Returns the criterion names in evaluation order.
    #[must_use]
    pub fn criterion_names(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|criterion| criterion.name).collect()
    }
}

impl<T> fmt::Debug for OrderingChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingChain")
            .field("criteria", &self.criterion_names())
            .finish()
    }
}
