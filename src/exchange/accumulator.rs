//! Growing reply text for one exchange.

/// Accumulates deltas in arrival order.
///
/// The reply is grown in place, so [`snapshot`](Self::snapshot) is a borrow
/// of the current text rather than a rebuild.
#[derive(Debug, Default, Clone)]
pub struct DeltaAccumulator {
    text: String,
    deltas: usize,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta to the end of the reply.
    pub fn append(&mut self, delta: &str) {
        self.text.push_str(delta);
        self.deltas += 1;
    }

    /// Full reply accumulated so far.
    pub fn snapshot(&self) -> &str {
        &self.text
    }

    /// Length of the snapshot in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of deltas appended so far.
    pub fn delta_count(&self) -> usize {
        self.deltas
    }

    /// Consume the accumulator, returning the final reply.
    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accumulator_is_empty() {
        let acc = DeltaAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.snapshot(), "");
        assert_eq!(acc.delta_count(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut acc = DeltaAccumulator::new();
        acc.append("Hel");
        acc.append("lo");
        acc.append(", world");

        assert_eq!(acc.snapshot(), "Hello, world");
        assert_eq!(acc.len(), "Hello, world".len());
        assert_eq!(acc.delta_count(), 3);
        assert_eq!(acc.into_text(), "Hello, world");
    }
}
