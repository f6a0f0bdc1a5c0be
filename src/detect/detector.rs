use std::collections::HashMap;

use burn::prelude::*;
use tracing::info;

use crate::detect::snapshot::{encode_positions, BallFieldSideState, FieldDimensions, FieldSnapshot};
use crate::error::DetectError;
use crate::model::BallFieldSideNetwork;
use crate::training::metrics::DECISION_THRESHOLD;

/// Anything that maps an encoded snapshot to P(ball on the right half).
pub trait SideClassifier {
    /// Length of the input vector.
    fn input_size(&self) -> usize;
    fn probability_right(&self, input: &[f32]) -> f32;
}

impl<B: Backend> SideClassifier for BallFieldSideNetwork<B> {
    fn input_size(&self) -> usize {
        BallFieldSideNetwork::input_size(self)
    }

    fn probability_right(&self, input: &[f32]) -> f32 {
        self.predict(input).first().copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Default)]
struct MatchState {
    field_length: Option<f64>,
    field_width: Option<f64>,
    ball_on_left_side: Option<bool>,
}

impl MatchState {
    fn field(&self) -> Option<FieldDimensions> {
        Some(FieldDimensions {
            length: self.field_length?,
            width: self.field_width?,
        })
    }
}

/// Per-match ball side tracker that only reports changes.
pub struct BallFieldSideDetector<C: SideClassifier> {
    classifier: C,
    matches: HashMap<String, MatchState>,
}

impl<C: SideClassifier> BallFieldSideDetector<C> {
    pub fn new(classifier: C) -> Self {
        BallFieldSideDetector {
            classifier,
            matches: HashMap::new(),
        }
    }

    /// Record the field length of a match, replacing any earlier value.
    pub fn set_field_length(&mut self, match_id: &str, length: f64) -> Result<(), DetectError> {
        check_dimension(match_id, "length", length)?;
        info!(match_id, length, "field length");
        self.state_mut(match_id).field_length = Some(length);
        Ok(())
    }

    /// Record the field width of a match, replacing any earlier value.
    pub fn set_field_width(&mut self, match_id: &str, width: f64) -> Result<(), DetectError> {
        check_dimension(match_id, "width", width)?;
        info!(match_id, width, "field width");
        self.state_mut(match_id).field_width = Some(width);
        Ok(())
    }

    pub fn set_field_dimensions(
        &mut self,
        match_id: &str,
        field: FieldDimensions,
    ) -> Result<(), DetectError> {
        check_dimension(match_id, "length", field.length)?;
        check_dimension(match_id, "width", field.width)?;
        self.set_field_length(match_id, field.length)?;
        self.set_field_width(match_id, field.width)
    }

    /// Last side reported for a match, if any.
    pub fn ball_on_left_side(&self, match_id: &str) -> Option<bool> {
        self.matches.get(match_id)?.ball_on_left_side
    }

    /// Classify a snapshot without touching the per-match side state.
    pub fn classify(&self, snapshot: &FieldSnapshot) -> Result<bool, DetectError> {
        let recorded = self
            .matches
            .get(&snapshot.match_id)
            .and_then(MatchState::field);
        let field = match recorded {
            Some(field) => field,
            None => {
                let field = snapshot
                    .field
                    .ok_or_else(|| DetectError::MissingFieldDimensions(snapshot.match_id.clone()))?;
                check_dimension(&snapshot.match_id, "length", field.length)?;
                check_dimension(&snapshot.match_id, "width", field.width)?;
                field
            }
        };

        let input = encode_positions(&snapshot.ball, &snapshot.players, field);
        let expected = self.classifier.input_size();
        if input.len() != expected {
            return Err(DetectError::InputSize {
                expected,
                actual: input.len(),
            });
        }

        // Anything that is not a clear "right", NaN included, counts as left
        let ball_on_right_side = self.classifier.probability_right(&input) >= DECISION_THRESHOLD;
        Ok(!ball_on_right_side)
    }

    /// Classify a snapshot and return a state element if the side changed.
    ///
    /// Field dimensions carried by the snapshot fill in whichever of length
    /// and width the match does not know yet. Known values are kept.
    pub fn process(
        &mut self,
        snapshot: &FieldSnapshot,
    ) -> Result<Option<BallFieldSideState>, DetectError> {
        if let Some(field) = snapshot.field {
            let known = self.matches.get(&snapshot.match_id);
            let has_length = known.is_some_and(|m| m.field_length.is_some());
            let has_width = known.is_some_and(|m| m.field_width.is_some());
            if !has_length {
                self.set_field_length(&snapshot.match_id, field.length)?;
            }
            if !has_width {
                self.set_field_width(&snapshot.match_id, field.width)?;
            }
        }

        let ball_on_left_side = self.classify(snapshot)?;
        let state = self.state_mut(&snapshot.match_id);
        if state.ball_on_left_side == Some(ball_on_left_side) {
            return Ok(None);
        }

        info!(
            match_id = %snapshot.match_id,
            ball_on_left_side,
            "ball side changed"
        );
        state.ball_on_left_side = Some(ball_on_left_side);
        Ok(Some(BallFieldSideState {
            match_id: snapshot.match_id.clone(),
            generation_timestamp: snapshot.generation_timestamp(),
            ball_on_left_side,
        }))
    }

    fn state_mut(&mut self, match_id: &str) -> &mut MatchState {
        self.matches.entry(match_id.to_string()).or_default()
    }
}

fn check_dimension(match_id: &str, dimension: &'static str, value: f64) -> Result<(), DetectError> {
    if value > 0.0 && value.is_finite() {
        return Ok(());
    }
    Err(DetectError::InvalidFieldDimension {
        match_id: match_id.to_string(),
        dimension,
        value,
    })
}
