//! This module defines parameters driving the clustering.
//!
//! A run is described by :
//!
//! - a cutoff : the maximum distance at which two labels may be considered linked.
//! - a boundary policy : if include_equal is true an edge qualifies when distance <= cutoff,
//!   otherwise when distance < cutoff. Default is true.
//! - the linkage method, see [Linkage]. Default is single linkage.
//! - an optional output layout overriding the default layout of the method, see [OutputLayout].
//!

use anyhow::anyhow;

use num_traits::Float;

use std::fmt::Debug;
use std::str::FromStr;

/// The clustering method, selected once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Linkage {
    /// connected components of the graph of qualifying edges
    Single,
    /// streaming complete linkage. Merges are decided on the distances observed so far,
    /// so the result depends on the order of the input stream.
    Complete,
    /// complete linkage computed after buffering all qualifying edges.
    /// Independent of input order but memory grows with the number of qualifying edges.
    Exact,
}

impl Linkage {
    /// layout used for output if none is asked for
    pub fn default_layout(&self) -> OutputLayout {
        match self {
            Linkage::Single => OutputLayout::PerLabel,
            Linkage::Complete | Linkage::Exact => OutputLayout::PerCluster,
        }
    }
} // end of impl Linkage

impl FromStr for Linkage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "exact" => Ok(Linkage::Exact),
            _ => Err(anyhow!(
                "not a valid linkage method : {:?}, expecting single, complete or exact",
                s
            )),
        }
    }
} // end of impl FromStr for Linkage

/// How cluster assignments are dumped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputLayout {
    /// one row `cluster_id \t label` by label
    PerLabel,
    /// one row `cluster_id \t member1, member2, ...` by cluster
    PerCluster,
}

impl FromStr for OutputLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "label" => Ok(OutputLayout::PerLabel),
            "cluster" => Ok(OutputLayout::PerCluster),
            _ => Err(anyhow!(
                "not a valid output layout : {:?}, expecting label or cluster",
                s
            )),
        }
    }
} // end of impl FromStr for OutputLayout

/// The qualifying test of an edge: distance compared to cutoff with inclusive or exclusive boundary.
#[derive(Clone, Copy, Debug)]
pub struct Cutoff<F> {
    value: F,
    include_equal: bool,
}

impl<F: Float> Cutoff<F> {
    pub fn new(value: F, include_equal: bool) -> Self {
        Cutoff {
            value,
            include_equal,
        }
    }

    /// returns true if an edge at distance dist can cause a merge
    #[inline]
    pub fn qualifies(&self, dist: F) -> bool {
        if self.include_equal {
            dist <= self.value
        } else {
            dist < self.value
        }
    }

    pub fn get_value(&self) -> F {
        self.value
    }

    pub fn is_inclusive(&self) -> bool {
        self.include_equal
    }
} // end of impl Cutoff

/// main parameters driving a clustering run
#[derive(Clone, Copy, Debug)]
pub struct ClusterParams<F> {
    /// distance cutoff, must be finite and > 0
    cutoff: F,
    /// do distances equal to cutoff qualify. default to true
    include_equal: bool,
    /// linkage method. default to single
    method: Linkage,
    /// output layout. None means the default of the method
    layout: Option<OutputLayout>,
} // end of ClusterParams

impl<F> ClusterParams<F>
where
    F: Float + Debug,
{
    /// checks cutoff and returns parameters, layout is left to the method default
    pub fn new(cutoff: F, include_equal: bool, method: Linkage) -> anyhow::Result<Self> {
        if !cutoff.is_finite() || cutoff <= F::zero() {
            return Err(anyhow!(
                "cutoff must be a finite value greater than 0, got {:?}",
                cutoff
            ));
        }
        Ok(ClusterParams {
            cutoff,
            include_equal,
            method,
            layout: None,
        })
    }

    /// single linkage, cutoff included, with given cutoff value
    pub fn default(cutoff: F) -> anyhow::Result<Self> {
        Self::new(cutoff, true, Linkage::Single)
    }

    pub fn log(&self) {
        log::info!("ClusterParams");
        log::info!("\t cutoff : {:?}", self.cutoff);
        log::info!("\t include equal : {}", self.include_equal);
        log::info!("\t method : {:?}", self.method);
        log::info!("\t output layout : {:?}", self.get_layout());
    }

    pub fn get_cutoff(&self) -> Cutoff<F> {
        Cutoff::new(self.cutoff, self.include_equal)
    }

    pub fn get_method(&self) -> Linkage {
        self.method
    }

    pub fn set_method(&mut self, method: Linkage) {
        self.method = method;
    }

    /// set to false to get a strict comparison to cutoff
    pub fn set_include_equal(&mut self, val: bool) {
        self.include_equal = val;
    }

    /// forces output layout, otherwise the default layout of the method is used
    pub fn set_layout(&mut self, layout: OutputLayout) {
        self.layout = Some(layout);
    }

    pub fn get_layout(&self) -> OutputLayout {
        self.layout.unwrap_or_else(|| self.method.default_layout())
    }
} // end of impl ClusterParams

//========================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cutoff_boundary() {
        let inclusive = Cutoff::new(0.03_f64, true);
        assert!(inclusive.qualifies(0.03));
        assert!(inclusive.qualifies(0.01));
        assert!(!inclusive.qualifies(0.031));
        //
        let strict = Cutoff::new(0.03_f64, false);
        assert!(!strict.qualifies(0.03));
        assert!(strict.qualifies(0.029));
    } // end of cutoff_boundary

    #[test]
    fn bad_cutoff_rejected() {
        assert!(ClusterParams::<f64>::default(0.).is_err());
        assert!(ClusterParams::<f64>::default(-1.).is_err());
        assert!(ClusterParams::<f64>::default(f64::NAN).is_err());
        assert!(ClusterParams::<f64>::default(f64::INFINITY).is_err());
        assert!(ClusterParams::<f32>::default(0.2).is_ok());
    }

    #[test]
    fn parse_method_and_layout() {
        assert_eq!("single".parse::<Linkage>().unwrap(), Linkage::Single);
        assert_eq!("Complete".parse::<Linkage>().unwrap(), Linkage::Complete);
        assert_eq!("exact".parse::<Linkage>().unwrap(), Linkage::Exact);
        assert!("average".parse::<Linkage>().is_err());
        //
        assert_eq!("label".parse::<OutputLayout>().unwrap(), OutputLayout::PerLabel);
        assert_eq!("cluster".parse::<OutputLayout>().unwrap(), OutputLayout::PerCluster);
        assert!("csv".parse::<OutputLayout>().is_err());
    }

    #[test]
    fn layout_defaults_to_method() {
        let mut params = ClusterParams::new(0.1_f64, true, Linkage::Complete).unwrap();
        assert_eq!(params.get_layout(), OutputLayout::PerCluster);
        params.set_method(Linkage::Single);
        assert_eq!(params.get_layout(), OutputLayout::PerLabel);
        params.set_layout(OutputLayout::PerCluster);
        assert_eq!(params.get_layout(), OutputLayout::PerCluster);
    }
} // end of mod tests
