// gathers modules to include

pub use crate::assignment::*;
pub use crate::clusterer::*;
pub use crate::clustparams::*;
pub use crate::linkage::{LabelRegistry, LinkageEngine};
pub use crate::tools::io::*;
