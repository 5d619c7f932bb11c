//! IQRM Core Library
//!
//! Flags interference-contaminated entries of a one-dimensional statistic of
//! time-frequency data (per-channel standard deviation, zero-DM time
//! series, ...). An entry is suspect when it is significantly larger than at
//! least one neighbour within a radius; a directed vote graph then decides
//! which suspects are credible so that one bad entry does not drag its
//! neighbours into the mask.
//!
//! Pipeline: [`lags`] → [`votes`] → [`arbiter`], driven by [`engine`].

pub mod arbiter;
pub mod engine;
pub mod error;
pub mod lags;
pub mod logging;
pub mod params;
pub mod votes;

pub use engine::{compute_mask, IqrmEngine, MaskResult};
pub use error::{Error, ErrorCategory, Result};
pub use iqrm_config::{IgnorePolicy, IqrmConfig};
pub use params::IqrmParams;
pub use votes::{VoteGraph, VoteMap};
