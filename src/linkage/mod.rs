//! module linkage
//!
//! Incremental clustering of labels from a stream of edges (label, label, distance)
//! given by a sparse distance matrix. Pairs absent from the stream are at maximal distance :
//! they never participate in a clustering decision.
//!
//! Three engines are provided :
//!
//! - [SingleLinkage] : clusters are the connected components of the graph of qualifying edges.
//!   It is a union-find over dense label indexes, the result does not depend on the order of edges.
//!
//! - [CompleteLinkage] : a streaming approximation of complete linkage. For each pair of clusters
//!   we keep the maximum distance observed so far between their members and two clusters merge
//!   only if this maximum is known and under the cutoff. As all cross pairs are not necessarily
//!   seen when a merge is decided, the result depends on the order of the stream.
//!
//! - [ExactCompleteLinkage] : buffers qualifying edges and runs the standard agglomeration by increasing
//!   complete linkage distance. A missing pair forbids a merge.
//!
//! Engines see labels as dense indexes given by a [LabelRegistry], labels are interned by the driver.
//!

mod complete;
mod exact;
mod registry;
mod single;
mod unionfind;

pub use complete::CompleteLinkage;
pub use exact::ExactCompleteLinkage;
pub use registry::{LabelIdx, LabelRegistry};
pub use single::SingleLinkage;
pub use unionfind::UnionFind;

/// identifier of a cluster inside an engine. Not contiguous, renumbered at export.
pub type ClusterIdx = usize;

/// For each label index, the cluster it was assigned to, None if it never was.
pub type Membership = Vec<Option<ClusterIdx>>;

/// The interface between the driver and a clustering engine.
pub trait LinkageEngine<F> {
    /// processes one edge between labels of index a and b. Edge need not qualify.
    fn process_edge(&mut self, a: LabelIdx, b: LabelIdx, dist: F);

    /// number of clusters with at least 2 members at this point of the stream
    fn nb_active_clusters(&self) -> usize;

    /// end of stream. Returns membership of the nb_labels first labels.
    fn into_membership(self: Box<Self>, nb_labels: usize) -> Membership;
}
