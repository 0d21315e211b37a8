//! streaming complete linkage
//!
//! Complete linkage asks that two clusters merge only if every pair of members, one in each cluster,
//! is within cutoff. In a stream we only know the pairs seen so far, so for each pair of clusters
//! we maintain the maximum distance observed between them and use it as the linkage distance.
//!
//! - A missing entry means no information : the two clusters are not (yet) eligible to merge.
//! - When a cluster absorbs a new label at distance d, we do not know the distances from this label
//!   to other clusters, the max distance to every other cluster is raised to at least d.
//! - An edge between two distinct clusters that does not lead to a merge is recorded,
//!   so a cross pair above cutoff forbids the merge for ever.
//!
//! The result depends on the order of the stream. See [ExactCompleteLinkage](super::ExactCompleteLinkage)
//! for an order independent (but buffering) version.

use indexmap::IndexSet;
use num_traits::Float;

use std::collections::HashMap;

use super::{ClusterIdx, LabelIdx, LinkageEngine, Membership};
use crate::clustparams::Cutoff;

/// A cluster owns its members and its row of the inter-cluster max distance table.
/// A retired cluster has both emptied.
struct Cluster<F> {
    members: Vec<LabelIdx>,
    /// max observed distance to other live clusters. The table is symmetric, each entry is stored in both rows.
    maxdist: HashMap<ClusterIdx, F>,
}

impl<F> Cluster<F> {
    fn new(members: Vec<LabelIdx>) -> Self {
        Cluster {
            members,
            maxdist: HashMap::new(),
        }
    }
}

pub struct CompleteLinkage<F> {
    cutoff: Cutoff<F>,
    /// cluster of each label, None until label goes through a qualifying edge
    label_cluster: Vec<Option<ClusterIdx>>,
    /// cluster arena, retired clusters stay in place so that ids are stable
    clusters: Vec<Cluster<F>>,
    /// ids of clusters not retired
    live: IndexSet<ClusterIdx>,
    nb_merges: usize,
    nb_refused: usize,
}

impl<F: Float> CompleteLinkage<F> {
    pub fn new(cutoff: Cutoff<F>) -> Self {
        CompleteLinkage {
            cutoff,
            label_cluster: Vec::new(),
            clusters: Vec::new(),
            live: IndexSet::new(),
            nb_merges: 0,
            nb_refused: 0,
        }
    }

    /// cluster of a label if assigned
    pub fn get_cluster(&self, label: LabelIdx) -> Option<ClusterIdx> {
        self.label_cluster.get(label).copied().flatten()
    }

    /// max distance observed between two distinct clusters, None if no information
    pub fn get_maxdist(&self, c1: ClusterIdx, c2: ClusterIdx) -> Option<F> {
        self.clusters
            .get(c1)
            .and_then(|c| c.maxdist.get(&c2))
            .copied()
    }

    /// number of merges of two clusters done
    pub fn get_nb_merges(&self) -> usize {
        self.nb_merges
    }

    /// number of edges between two distinct clusters that did not lead to a merge
    pub fn get_nb_refused(&self) -> usize {
        self.nb_refused
    }

    fn grow_to(&mut self, label: LabelIdx) {
        if self.label_cluster.len() <= label {
            self.label_cluster.resize(label + 1, None);
        }
    }

    fn set_maxdist(&mut self, c1: ClusterIdx, c2: ClusterIdx, dist: F) {
        self.clusters[c1].maxdist.insert(c2, dist);
        self.clusters[c2].maxdist.insert(c1, dist);
    }

    // raise max distance between c1 and c2 to at least dist
    fn record(&mut self, c1: ClusterIdx, c2: ClusterIdx, dist: F) {
        let maxdist = match self.get_maxdist(c1, c2) {
            Some(d) => d.max(dist),
            None => dist,
        };
        self.set_maxdist(c1, c2, maxdist);
    }

    fn create_cluster(&mut self, a: LabelIdx, b: LabelIdx) -> ClusterIdx {
        let c = self.clusters.len();
        self.clusters.push(Cluster::new(vec![a, b]));
        self.label_cluster[a] = Some(c);
        self.label_cluster[b] = Some(c);
        self.live.insert(c);
        log::trace!("creating cluster {} with labels {} {}", c, a, b);
        c
    }

    fn absorb(&mut self, c: ClusterIdx, label: LabelIdx, dist: F) {
        self.clusters[c].members.push(label);
        self.label_cluster[label] = Some(c);
        // distances of label to other clusters are at least dist as far as we know.
        for &o in self.live.iter() {
            if o == c {
                continue;
            }
            let maxdist = match self.clusters[c].maxdist.get(&o).copied() {
                Some(d) => d.max(dist),
                None => dist,
            };
            self.clusters[c].maxdist.insert(o, maxdist);
            self.clusters[o].maxdist.insert(c, maxdist);
        }
    } // end of absorb

    fn merge(&mut self, c1: ClusterIdx, c2: ClusterIdx) -> ClusterIdx {
        let (n1, n2) = (self.clusters[c1].members.len(), self.clusters[c2].members.len());
        let (survivor, retired) = if n1 > n2 || (n1 == n2 && c1 < c2) {
            (c1, c2)
        } else {
            (c2, c1)
        };
        log::trace!("merging cluster {} into {}", retired, survivor);
        let members = std::mem::take(&mut self.clusters[retired].members);
        let row = std::mem::take(&mut self.clusters[retired].maxdist);
        for &l in &members {
            self.label_cluster[l] = Some(survivor);
        }
        self.clusters[survivor].members.extend(members);
        self.clusters[survivor].maxdist.remove(&retired);
        // element-wise max of the two rows
        for (o, dist) in row {
            if o == survivor {
                continue;
            }
            self.clusters[o].maxdist.remove(&retired);
            self.record(survivor, o, dist);
        }
        self.live.swap_remove(&retired);
        self.nb_merges += 1;
        survivor
    } // end of merge
} // end of impl CompleteLinkage

impl<F: Float> LinkageEngine<F> for CompleteLinkage<F> {
    fn process_edge(&mut self, a: LabelIdx, b: LabelIdx, dist: F) {
        self.grow_to(a.max(b));
        if a == b {
            return;
        }
        let qualifies = self.cutoff.qualifies(dist);
        match (self.label_cluster[a], self.label_cluster[b]) {
            (None, None) => {
                if qualifies {
                    self.create_cluster(a, b);
                }
            }
            (Some(c), None) => {
                if qualifies {
                    self.absorb(c, b, dist);
                }
            }
            (None, Some(c)) => {
                if qualifies {
                    self.absorb(c, a, dist);
                }
            }
            (Some(c1), Some(c2)) => {
                if c1 == c2 {
                    return;
                }
                let mergeable = qualifies
                    && match self.get_maxdist(c1, c2) {
                        Some(maxdist) => self.cutoff.qualifies(maxdist.max(dist)),
                        None => false,
                    };
                if mergeable {
                    self.merge(c1, c2);
                } else {
                    self.nb_refused += 1;
                    self.record(c1, c2, dist);
                }
            }
        }
    } // end of process_edge

    fn nb_active_clusters(&self) -> usize {
        self.live.len()
    }

    fn into_membership(self: Box<Self>, nb_labels: usize) -> Membership {
        log::debug!(
            "complete linkage : nb merges {}, nb refused merges {}",
            self.nb_merges,
            self.nb_refused
        );
        (0..nb_labels)
            .map(|l| self.label_cluster.get(l).copied().flatten())
            .collect()
    }
} // end of impl LinkageEngine for CompleteLinkage

//========================================================================================

// end of mod tests
