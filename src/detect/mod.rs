//! Ball field side detection on live field snapshots using a trained model.

mod detector;
mod snapshot;

pub use detector::{BallFieldSideDetector, SideClassifier};
pub use snapshot::{
    encode_positions, BallFieldSideState, FieldDimensions, FieldSnapshot, ObjectPosition,
};
