//! Single and complete linkage clustering of labels (sequences for example) from a sparse distance matrix
//! given as a stream of lines `label1 label2 distance`.
//!
//! Pairs absent from the stream are at maximal distance. Memory is proportional to the number
//! of distinct labels and active clusters, not to the number of edges, except for the exact
//! complete linkage which buffers qualifying edges.
//!
//! Logging is done with the crates **log** and **env_logger**, set RUST_LOG=sparseclust=INFO
//! to get parameters, progress and a summary of the run.

pub mod assignment;
pub mod clusterer;
pub mod clustparams;
pub mod linkage;
pub mod prelude;
pub mod tools;

#[cfg(test)]
mod tests {
    #[test]
    // initialize once log system for tests.
    fn init_log() {
        let _res = env_logger::try_init();
    }
} // end of tests
