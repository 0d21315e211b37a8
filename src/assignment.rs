//! Final label to cluster assignment.
//!
//! Engines return arbitrary, sparse cluster ids. They are renumbered here to a dense range [0..nb_clusters]
//! in order of first encounter, labels being visited in order of their first appearance in the input stream.
//! So numbering is reproducible from one run to another on the same input.
//! Labels never assigned by the engine (seen only in non qualifying edges) get their own singleton cluster.

use std::collections::HashMap;

use crate::linkage::{ClusterIdx, LabelRegistry, Membership};

/// dense cluster id as dumped
pub type ClusterId = usize;

pub struct ClusterAssignment {
    registry: LabelRegistry,
    /// cluster_ids\[i\] is the cluster of label of index i in registry
    cluster_ids: Vec<ClusterId>,
    nb_clusters: usize,
}

impl ClusterAssignment {
    /// renumbers membership given by an engine. membership must cover all labels of registry
    pub fn new(registry: LabelRegistry, membership: &Membership) -> Self {
        assert_eq!(
            registry.len(),
            membership.len(),
            "membership and registry sizes differ"
        );
        let mut old_to_new = HashMap::<ClusterIdx, ClusterId>::new();
        let mut nb_clusters = 0;
        let mut cluster_ids = Vec::<ClusterId>::with_capacity(membership.len());
        for old in membership {
            let id = match old {
                Some(c) => *old_to_new.entry(*c).or_insert_with(|| {
                    nb_clusters += 1;
                    nb_clusters - 1
                }),
                None => {
                    nb_clusters += 1;
                    nb_clusters - 1
                }
            };
            cluster_ids.push(id);
        }
        log::debug!(
            "renumbering : {} labels, {} clusters, {} not singletons",
            cluster_ids.len(),
            nb_clusters,
            old_to_new.len()
        );
        ClusterAssignment {
            registry,
            cluster_ids,
            nb_clusters,
        }
    } // end of new

    pub fn get_nb_clusters(&self) -> usize {
        self.nb_clusters
    }

    pub fn get_nb_labels(&self) -> usize {
        self.cluster_ids.len()
    }

    /// cluster of a label, None if label was never seen
    pub fn get_cluster(&self, label: &str) -> Option<ClusterId> {
        self.registry
            .get_index(label)
            .map(|idx| self.cluster_ids[idx])
    }

    /// returns (cluster id, label) sorted by cluster id then label
    pub fn get_sorted_rows(&self) -> Vec<(ClusterId, &str)> {
        let mut rows: Vec<(ClusterId, &str)> = self
            .registry
            .iter()
            .zip(self.cluster_ids.iter())
            .map(|(label, id)| (*id, label))
            .collect();
        rows.sort_unstable();
        rows
    }

    /// returns members of each cluster, indexed by cluster id. Members are sorted.
    pub fn get_clusters(&self) -> Vec<Vec<&str>> {
        let mut clusters: Vec<Vec<&str>> = vec![Vec::new(); self.nb_clusters];
        for (label, id) in self.registry.iter().zip(self.cluster_ids.iter()) {
            clusters[*id].push(label);
        }
        for members in clusters.iter_mut() {
            members.sort_unstable();
        }
        clusters
    }

    /// the partition as a sorted list of sorted member lists, forgetting ids.
    /// Useful to compare results of different runs.
    pub fn get_partition(&self) -> Vec<Vec<String>> {
        let mut partition: Vec<Vec<String>> = self
            .get_clusters()
            .into_iter()
            .map(|members| members.into_iter().map(String::from).collect())
            .collect();
        partition.sort_unstable();
        partition
    }
} // end of impl ClusterAssignment

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn registry(labels: &[&str]) -> LabelRegistry {
        let mut registry = LabelRegistry::new();
        for l in labels {
            registry.intern(l);
        }
        registry
    }

    #[test]
    fn dense_first_seen_numbering() {
        // engine ids are sparse, label "z" was never assigned
        let registry = registry(&["c", "a", "z", "b", "d"]);
        let membership = vec![Some(17), Some(4), None, Some(17), Some(4)];
        let assignment = ClusterAssignment::new(registry, &membership);
        assert_eq!(assignment.get_nb_clusters(), 3);
        assert_eq!(assignment.get_nb_labels(), 5);
        assert_eq!(assignment.get_cluster("c"), Some(0));
        assert_eq!(assignment.get_cluster("b"), Some(0));
        assert_eq!(assignment.get_cluster("a"), Some(1));
        assert_eq!(assignment.get_cluster("d"), Some(1));
        assert_eq!(assignment.get_cluster("z"), Some(2));
        assert_eq!(assignment.get_cluster("y"), None);
    }

    #[test]
    fn rows_sorted_by_id_then_label() {
        let registry = registry(&["c", "a", "z", "b", "d"]);
        let membership = vec![Some(17), Some(4), None, Some(17), Some(4)];
        let assignment = ClusterAssignment::new(registry, &membership);
        let rows = assignment.get_sorted_rows();
        assert_eq!(rows, vec![(0, "b"), (0, "c"), (1, "a"), (1, "d"), (2, "z")]);
        let clusters = assignment.get_clusters();
        assert_eq!(clusters, vec![vec!["b", "c"], vec!["a", "d"], vec!["z"]]);
        let partition = assignment.get_partition();
        assert_eq!(partition[0], vec!["a".to_string(), "d".to_string()]);
    }

    #[test]
    fn ids_are_contiguous() {
        let labels: Vec<String> = (0..50).map(|i| format!("s{}", i)).collect();
        let refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        let registry = registry(&refs);
        // every third label unassigned, others in clusters by i % 7
        let membership: Membership = (0..50)
            .map(|i| if i % 3 == 0 { None } else { Some(1000 + 13 * (i % 7)) })
            .collect();
        let assignment = ClusterAssignment::new(registry, &membership);
        let mut ids: Vec<ClusterId> = assignment.get_sorted_rows().iter().map(|r| r.0).collect();
        ids.dedup();
        assert_eq!(ids, (0..assignment.get_nb_clusters()).collect::<Vec<_>>());
        assert_eq!(assignment.get_nb_clusters(), 17 + 7);
    }
} // end of mod tests
