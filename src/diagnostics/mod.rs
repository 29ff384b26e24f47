//! Serialisable record of a digitizer run.
//!
//! [`DigitizeReport`] bundles the extracted trajectory with a
//! [`DigitizeTrace`] describing the decisions of every stage, ready to be
//! written next to the output as JSON.

pub mod report;
pub mod timing;

pub use report::{DigitizeReport, DigitizeTrace, InputDescriptor};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
