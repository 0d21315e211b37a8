//! Some tools for reading edges and dumping clusters

pub mod io;
