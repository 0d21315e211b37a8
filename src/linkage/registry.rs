//! Label registry : gives each distinct label a dense index in order of first appearance.

use indexmap::IndexSet;

/// index of a label in the registry. Indexes are contiguous in [0..nb_labels]
pub type LabelIdx = usize;

/// The universe of labels seen in the stream, labels are never removed.
#[derive(Clone, Default)]
pub struct LabelRegistry {
    labels: IndexSet<String>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        LabelRegistry {
            labels: IndexSet::new(),
        }
    }

    /// returns index of label, allocating one if label was never seen.
    /// The label is copied only on first sight.
    pub fn intern(&mut self, label: &str) -> LabelIdx {
        match self.labels.get_index_of(label) {
            Some(idx) => idx,
            None => self.labels.insert_full(label.to_string()).0,
        }
    }

    pub fn get_index(&self, label: &str) -> Option<LabelIdx> {
        self.labels.get_index_of(label)
    }

    pub fn get_label(&self, idx: LabelIdx) -> Option<&str> {
        self.labels.get_index(idx).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// iterates on labels in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }
} // end of impl LabelRegistry

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn first_seen_order() {
        let mut registry = LabelRegistry::new();
        assert_eq!(registry.intern("seq3"), 0);
        assert_eq!(registry.intern("seq1"), 1);
        assert_eq!(registry.intern("seq3"), 0);
        assert_eq!(registry.intern("seq2"), 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get_index("seq1"), Some(1));
        assert_eq!(registry.get_index("seq4"), None);
        assert_eq!(registry.get_label(2), Some("seq2"));
        let labels: Vec<&str> = registry.iter().collect();
        assert_eq!(labels, vec!["seq3", "seq1", "seq2"]);
    }
} // end of mod tests
