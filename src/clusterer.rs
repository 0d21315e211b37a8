//! The driver : interns labels, dispatches edges to the engine selected by [ClusterParams]
//! and renumbers clusters at end of stream.
//!
//! ```no_run
//! use sparseclust::prelude::*;
//!
//! let params = ClusterParams::<f64>::new(0.03, true, Linkage::Single).unwrap();
//! let assignment = cluster_file(std::path::Path::new("distmx.txt"), params).unwrap();
//! println!("nb clusters : {}", assignment.get_nb_clusters());
//! ```

use cpu_time::ProcessTime;
use std::time::{Duration, SystemTime};

use num_traits::Float;

use std::fmt::Debug;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::assignment::ClusterAssignment;
use crate::clustparams::{ClusterParams, Linkage};
use crate::linkage::*;
use crate::tools::io::{fmt_float, EdgeReader};

// progress is logged every LOG_PERIOD lines
const LOG_PERIOD: usize = 10_000_000;

pub struct Clusterer<F> {
    params: ClusterParams<F>,
    registry: LabelRegistry,
    engine: Box<dyn LinkageEngine<F>>,
    /// number of edges pushed
    nb_edges: usize,
    /// number of qualifying edges pushed
    nb_qualifying: usize,
}

impl<F> Clusterer<F>
where
    F: Float + FromStr + Debug + 'static,
{
    pub fn new(params: ClusterParams<F>) -> Self {
        let cutoff = params.get_cutoff();
        let engine: Box<dyn LinkageEngine<F>> = match params.get_method() {
            Linkage::Single => Box::new(SingleLinkage::new(cutoff)),
            Linkage::Complete => Box::new(CompleteLinkage::new(cutoff)),
            Linkage::Exact => Box::new(ExactCompleteLinkage::new(cutoff)),
        };
        Clusterer {
            params,
            registry: LabelRegistry::new(),
            engine,
            nb_edges: 0,
            nb_qualifying: 0,
        }
    } // end of new

    pub fn get_params(&self) -> &ClusterParams<F> {
        &self.params
    }

    /// number of distinct labels seen
    pub fn get_nb_labels(&self) -> usize {
        self.registry.len()
    }

    pub fn get_nb_edges(&self) -> usize {
        self.nb_edges
    }

    pub fn get_nb_qualifying(&self) -> usize {
        self.nb_qualifying
    }

    /// registers labels and sends edge to engine
    pub fn push_edge(&mut self, label1: &str, label2: &str, dist: F) {
        let a = self.registry.intern(label1);
        let b = self.registry.intern(label2);
        if self.params.get_cutoff().qualifies(dist) {
            self.nb_qualifying += 1;
        }
        self.engine.process_edge(a, b, dist);
        self.nb_edges += 1;
    } // end of push_edge

    /// consumes all edges of reader. Returns the number of edges processed.
    pub fn cluster_reader<R: BufRead>(&mut self, reader: &mut EdgeReader<R>) -> anyhow::Result<usize> {
        let nb_start = self.nb_edges;
        while let Some((label1, label2, dist)) = reader.next_edge::<F>()? {
            self.push_edge(label1, label2, dist);
            if reader.get_nb_lines() % LOG_PERIOD == 0 {
                log::info!(
                    "nb lines read : {}, nb labels : {}, nb active clusters : {}",
                    reader.get_nb_lines(),
                    self.registry.len(),
                    self.engine.nb_active_clusters()
                );
            }
        }
        log::info!(
            "end of stream : nb lines {}, nb skipped lines {}",
            reader.get_nb_lines(),
            reader.get_nb_skipped()
        );
        Ok(self.nb_edges - nb_start)
    } // end of cluster_reader

    /// end of stream, renumbers clusters
    pub fn finish(self) -> ClusterAssignment {
        log::info!(
            "nb edges : {}, nb qualifying edges : {} (cutoff {}), nb labels : {}",
            self.nb_edges,
            self.nb_qualifying,
            fmt_float(self.params.get_cutoff().get_value()),
            self.registry.len()
        );
        let membership = self.engine.into_membership(self.registry.len());
        let assignment = ClusterAssignment::new(self.registry, &membership);
        log::info!("nb clusters : {}", assignment.get_nb_clusters());
        assignment
    } // end of finish
} // end of impl Clusterer

/// clusters edges given in memory.
pub fn cluster_edges<F, S, I>(edges: I, params: ClusterParams<F>) -> ClusterAssignment
where
    F: Float + FromStr + Debug + 'static,
    S: AsRef<str>,
    I: IntoIterator<Item = (S, S, F)>,
{
    let mut clusterer = Clusterer::new(params);
    for (label1, label2, dist) in edges {
        clusterer.push_edge(label1.as_ref(), label2.as_ref(), dist);
    }
    clusterer.finish()
} // end of cluster_edges

/// streams the edge file at filepath through the engine selected in params
pub fn cluster_file<F>(filepath: &Path, params: ClusterParams<F>) -> anyhow::Result<ClusterAssignment>
where
    F: Float + FromStr + Debug + 'static,
{
    params.log();
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    //
    let mut reader = EdgeReader::from_path(filepath)?;
    log::info!("reading edges from {}", filepath.display());
    let mut clusterer = Clusterer::new(params);
    clusterer.cluster_reader(&mut reader)?;
    let assignment = clusterer.finish();
    //
    let cpu_time: Duration = cpu_start.elapsed();
    log::info!(
        " clustering sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().unwrap_or_default().as_millis(),
        cpu_time.as_millis()
    );
    Ok(assignment)
} // end of cluster_file

//========================================================================================

// end of mod tests
