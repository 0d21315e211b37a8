//! single linkage
//!
//! Two labels are in the same cluster iff they are connected by a path of qualifying edges.
//! The distance of an edge matters only through the cutoff test, once connectivity is established
//! it is forgotten.

use num_traits::Float;

use super::unionfind::UnionFind;
use super::{ClusterIdx, LabelIdx, LinkageEngine, Membership};
use crate::clustparams::Cutoff;

pub struct SingleLinkage<F> {
    cutoff: Cutoff<F>,
    unionf: UnionFind,
    /// true if label went through a qualifying edge
    assigned: Vec<bool>,
    /// number of classes with more than one label
    nb_clusters: usize,
}

impl<F: Float> SingleLinkage<F> {
    pub fn new(cutoff: Cutoff<F>) -> Self {
        SingleLinkage {
            cutoff,
            unionf: UnionFind::new(),
            assigned: Vec::new(),
            nb_clusters: 0,
        }
    }

    fn grow_to(&mut self, label: LabelIdx) {
        self.unionf.grow_to(label);
        if self.assigned.len() <= label {
            self.assigned.resize(label + 1, false);
        }
    }

    /// returns true if a and b are currently in the same cluster
    pub fn same_cluster(&mut self, a: LabelIdx, b: LabelIdx) -> bool {
        if a.max(b) >= self.unionf.len() {
            return a == b;
        }
        self.unionf.find(a) == self.unionf.find(b)
    }
} // end of impl SingleLinkage

impl<F: Float> LinkageEngine<F> for SingleLinkage<F> {
    fn process_edge(&mut self, a: LabelIdx, b: LabelIdx, dist: F) {
        self.grow_to(a.max(b));
        if a == b || !self.cutoff.qualifies(dist) {
            return;
        }
        match (self.assigned[a], self.assigned[b]) {
            (false, false) => {
                self.nb_clusters += 1;
            }
            (true, true) => {
                if self.unionf.find(a) != self.unionf.find(b) {
                    self.nb_clusters -= 1;
                }
            }
            _ => {}
        }
        self.assigned[a] = true;
        self.assigned[b] = true;
        self.unionf.union(a, b);
    } // end of process_edge

    fn nb_active_clusters(&self) -> usize {
        self.nb_clusters
    }

    fn into_membership(mut self: Box<Self>, nb_labels: usize) -> Membership {
        if nb_labels > 0 {
            self.grow_to(nb_labels - 1);
        }
        (0..nb_labels)
            .map(|l| -> Option<ClusterIdx> {
                if self.assigned[l] {
                    Some(self.unionf.find(l))
                } else {
                    None
                }
            })
            .collect()
    }
} // end of impl LinkageEngine for SingleLinkage

//========================================================================================

// end of mod tests
