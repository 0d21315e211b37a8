//! complete linkage on the buffered sparse graph.
//!
//! Qualifying edges are kept, non qualifying pairs and pairs absent from the stream are unlinkable.
//! Starting from singletons we repeatedly merge the two linked clusters with the smallest complete
//! linkage distance. Two clusters A and B are linked iff every pair (a,b) in A x B is a qualifying edge,
//! the distance being the max over these pairs. After merging A and B, the new cluster is linked to O
//! iff A and B were both linked to O, with distance max(d(A,O), d(B,O)) (Lance-Williams update for complete linkage).
//!
//! Memory is proportional to the number of qualifying edges.
//! Ties in distance are broken by smallest pair of cluster index, so the result does not depend
//! on input order as long as distances of candidate merges are distinct.

use num_traits::Float;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::{ClusterIdx, LabelIdx, LinkageEngine, Membership};
use crate::clustparams::Cutoff;

// a candidate merge. Ordered so that BinaryHeap pops smallest distance first.
struct MergeCandidate<F> {
    dist: F,
    a: ClusterIdx,
    b: ClusterIdx,
}

impl<F: Float> MergeCandidate<F> {
    fn new(dist: F, c1: ClusterIdx, c2: ClusterIdx) -> Self {
        MergeCandidate {
            dist,
            a: c1.min(c2),
            b: c1.max(c2),
        }
    }
}

impl<F: Float> PartialEq for MergeCandidate<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for MergeCandidate<F> {}

impl<F: Float> PartialOrd for MergeCandidate<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// distances are checked finite at parsing, so partial_cmp does not fail
impl<F: Float> Ord for MergeCandidate<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.a.cmp(&self.a))
            .then_with(|| other.b.cmp(&self.b))
    }
}

pub struct ExactCompleteLinkage<F> {
    cutoff: Cutoff<F>,
    /// links\[c\] maps each cluster linked to c to the complete linkage distance.
    /// Before agglomeration clusters are labels and links are the qualifying edges.
    links: Vec<HashMap<ClusterIdx, F>>,
    nb_edges: usize,
}

impl<F: Float> ExactCompleteLinkage<F> {
    pub fn new(cutoff: Cutoff<F>) -> Self {
        ExactCompleteLinkage {
            cutoff,
            links: Vec::new(),
            nb_edges: 0,
        }
    }

    /// number of distinct qualifying pairs buffered
    pub fn get_nb_edges(&self) -> usize {
        self.nb_edges
    }

    fn grow_to(&mut self, label: LabelIdx) {
        if self.links.len() <= label {
            self.links.resize_with(label + 1, HashMap::new);
        }
    }

    // merge b into a, returns number of links of the new cluster
    fn merge(&mut self, a: ClusterIdx, b: ClusterIdx, heap: &mut BinaryHeap<MergeCandidate<F>>) -> usize {
        let row_a = std::mem::take(&mut self.links[a]);
        let row_b = std::mem::take(&mut self.links[b]);
        let mut new_row = HashMap::<ClusterIdx, F>::with_capacity(row_a.len().min(row_b.len()));
        for (o, da) in row_a {
            if o == b {
                continue;
            }
            self.links[o].remove(&a);
            if let Some(db) = row_b.get(&o) {
                new_row.insert(o, da.max(*db));
            }
        }
        for o in row_b.keys() {
            if *o != a {
                self.links[*o].remove(&b);
            }
        }
        for (&o, &d) in new_row.iter() {
            self.links[o].insert(a, d);
            heap.push(MergeCandidate::new(d, a, o));
        }
        let nb_links = new_row.len();
        self.links[a] = new_row;
        nb_links
    } // end of merge

    fn agglomerate(&mut self) -> Vec<Vec<LabelIdx>> {
        let nb_nodes = self.links.len();
        let mut members: Vec<Vec<LabelIdx>> = (0..nb_nodes).map(|l| vec![l]).collect();
        let mut alive = vec![true; nb_nodes];
        let mut heap = BinaryHeap::<MergeCandidate<F>>::with_capacity(self.nb_edges);
        for (a, row) in self.links.iter().enumerate() {
            for (&b, &d) in row.iter() {
                if a < b {
                    heap.push(MergeCandidate::new(d, a, b));
                }
            }
        }
        let mut nb_merges = 0;
        while let Some(candidate) = heap.pop() {
            let (a, b) = (candidate.a, candidate.b);
            if !alive[a] || !alive[b] {
                continue;
            }
            // skip outdated candidates
            match self.links[a].get(&b) {
                Some(d) if *d == candidate.dist => {}
                _ => continue,
            }
            let nb_links = self.merge(a, b, &mut heap);
            alive[b] = false;
            let mut moved = std::mem::take(&mut members[b]);
            if moved.len() > members[a].len() {
                std::mem::swap(&mut moved, &mut members[a]);
            }
            members[a].extend(moved);
            nb_merges += 1;
            log::trace!(
                "merged {} into {} at distance {:?}, new cluster has {} links",
                b,
                a,
                candidate.dist.to_f64(),
                nb_links
            );
        }
        log::debug!("exact complete linkage : nb merges {}", nb_merges);
        members
    } // end of agglomerate
} // end of impl ExactCompleteLinkage

impl<F: Float> LinkageEngine<F> for ExactCompleteLinkage<F> {
    fn process_edge(&mut self, a: LabelIdx, b: LabelIdx, dist: F) {
        self.grow_to(a.max(b));
        if a == b || !self.cutoff.qualifies(dist) {
            return;
        }
        // a repeated pair keeps the largest qualifying distance
        let d = match self.links[a].get(&b).copied() {
            Some(old) => old.max(dist),
            None => {
                self.nb_edges += 1;
                dist
            }
        };
        self.links[a].insert(b, d);
        self.links[b].insert(a, d);
    } // end of process_edge

    // no cluster exists before end of stream
    fn nb_active_clusters(&self) -> usize {
        0
    }

    fn into_membership(mut self: Box<Self>, nb_labels: usize) -> Membership {
        log::debug!(
            "exact complete linkage : agglomerating {} nodes, {} edges",
            self.links.len(),
            self.nb_edges
        );
        let clusters = self.agglomerate();
        let mut membership: Membership = vec![None; nb_labels];
        for (c, labels) in clusters.iter().enumerate() {
            if labels.len() < 2 {
                continue;
            }
            for &l in labels {
                if l < nb_labels {
                    membership[l] = Some(c);
                }
            }
        }
        membership
    }
} // end of impl LinkageEngine for ExactCompleteLinkage

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn run(edges: &[(usize, usize, f64)], cutoff: f64, nb_labels: usize) -> Membership {
        let mut engine = ExactCompleteLinkage::new(Cutoff::new(cutoff, true));
        for &(a, b, d) in edges {
            engine.process_edge(a, b, d);
        }
        Box::new(engine).into_membership(nb_labels)
    }

    #[test]
    fn missing_pair_forbids_merge() {
        log_init_test();
        // A-C absent
        let membership = run(&[(0, 1, 0.01), (1, 2, 0.02)], 0.03, 3);
        assert_eq!(membership[0], membership[1]);
        assert!(membership[0].is_some());
        assert!(membership[2].is_none());
        // all pairs present
        let membership = run(&[(0, 1, 0.01), (1, 2, 0.02), (0, 2, 0.025)], 0.03, 3);
        assert_eq!(membership[0], membership[1]);
        assert_eq!(membership[1], membership[2]);
    }

    #[test]
    fn smallest_distance_merges_first() {
        log_init_test();
        // B-C is the closest pair, A-C does not qualify so A stays alone
        let membership = run(&[(0, 1, 0.1), (1, 2, 0.05), (0, 2, 0.2)], 0.15, 3);
        assert_eq!(membership[1], membership[2]);
        assert!(membership[1].is_some());
        assert!(membership[0].is_none());
    }

    #[test]
    fn two_groups_and_repeated_pair() {
        // {0,1,2} complete, {3,4} linked, 2-3 linked but 1-3 missing
        let edges = [
            (0, 1, 0.01),
            (1, 2, 0.02),
            (0, 2, 0.015),
            (3, 4, 0.01),
            (2, 3, 0.005),
            // repeat, largest distance kept
            (3, 4, 0.5),
            (3, 4, 0.02),
        ];
        let membership = run(&edges, 0.03, 6);
        // 2-3 at 0.005 merges first, then {2,3} can not reach any other cluster
        assert_eq!(membership[2], membership[3]);
        assert_eq!(membership[0], membership[1]);
        assert_ne!(membership[0], membership[2]);
        assert!(membership[4].is_none());
        assert!(membership[5].is_none());
    }

    #[test]
    fn candidate_order() {
        let mut heap = BinaryHeap::new();
        heap.push(MergeCandidate::new(0.2_f64, 0, 1));
        heap.push(MergeCandidate::new(0.1_f64, 4, 3));
        heap.push(MergeCandidate::new(0.1_f64, 2, 5));
        let first = heap.pop().unwrap();
        assert_eq!((first.a, first.b), (2, 5));
        let second = heap.pop().unwrap();
        assert_eq!((second.a, second.b), (3, 4));
        let third = heap.pop().unwrap();
        assert_eq!((third.a, third.b), (0, 1));
    }
} // end of mod tests
