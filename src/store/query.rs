use std::cmp::Ordering;
use std::fmt;

type Filter<'q, D> = Box<dyn Fn(&D) -> bool + 'q>;
type Comparator<'q, D> = Box<dyn Fn(&D, &D) -> Ordering + 'q>;

/// A single-collection query: optional filter, sort and limit.
///
/// Sorting is stable, so documents that compare equal keep the store's
/// default ordering.
pub struct Query<'q, D> {
    filter: Option<Filter<'q, D>>,
    order: Option<Comparator<'q, D>>,
    limit: Option<usize>,
}

impl<'q, D> Default for Query<'q, D> {
    fn default() -> Self {
        Self::all()
    }
}

impl<'q, D> Query<'q, D> {
    /// Match every document in the collection.
    pub fn all() -> Self {
        Self {
            filter: None,
            order: None,
            limit: None,
        }
    }

    /// Match documents accepted by `predicate`.
    pub fn filter(predicate: impl Fn(&D) -> bool + 'q) -> Self {
        Self {
            filter: Some(Box::new(predicate)),
            ..Self::all()
        }
    }

    /// Sort results with `compare`.
    pub fn sort_by(mut self, compare: impl Fn(&D, &D) -> Ordering + 'q) -> Self {
        self.order = Some(Box::new(compare));
        self
    }

    /// Return at most `n` documents (applied after sorting).
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Whether `doc` passes the filter.
    pub fn matches(&self, doc: &D) -> bool {
        self.filter.as_ref().map_or(true, |f| f(doc))
    }

    /// Sort and truncate an already-filtered result set.
    pub fn finish(&self, mut docs: Vec<D>) -> Vec<D> {
        if let Some(order) = &self.order {
            docs.sort_by(|a, b| order(a, b));
        }
        if let Some(limit) = self.limit {
            docs.truncate(limit);
        }
        docs
    }
}

impl<D> fmt::Debug for Query<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filtered", &self.filter.is_some())
            .field("sorted", &self.order.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}
