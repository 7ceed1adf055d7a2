/// A last-in-first-out container a cheapest-path query writes its labels into.
pub trait PathStack<T> {
    fn push(&mut self, item: T);

    fn pop(&mut self) -> Option<T>;

    fn peek(&self) -> Option<&T>;

    fn is_empty(&self) -> bool;

    fn clear(&mut self);
}

impl<T> PathStack<T> for Vec<T> {
    fn push(&mut self, item: T) {
        Vec::push(self, item)
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn peek(&self) -> Option<&T> {
        self.last()
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }
}

/// The result of a successful cheapest-path query.
///
/// # Fields
///
/// * `cost` - Sum of the edge weights along the path.
/// * `labels` - Vertex labels from origin to destination, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<L> {
    pub cost: f64,
    pub labels: Vec<L>,
}

impl<L> Route<L> {
    pub fn origin(&self) -> Option<&L> {
        self.labels.first()
    }

    pub fn destination(&self) -> Option<&L> {
        self.labels.last()
    }

    /// Number of edges on the route.
    pub fn hops(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }
}
