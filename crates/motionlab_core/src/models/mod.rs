//! Engine input/output data types.

pub mod analysis;
pub mod frame;

pub use analysis::{
    AnalysisReport, AngleAssessment, AngleReport, AssessmentStatus, FrameAngles, Phase,
};
pub use frame::{Frame, LandmarkSequence, Point};
