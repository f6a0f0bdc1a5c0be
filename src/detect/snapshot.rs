use serde::{Deserialize, Serialize};

use crate::data::COORDS_PER_OBJECT;

/// Latest known position of one field object, in metres from the centre spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPosition {
    pub object_id: String,
    pub x: f64,
    pub y: f64,
    /// Generation timestamp of the position update.
    pub timestamp: u64,
}

/// Field size in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub length: f64,
    pub width: f64,
}

/// Ball and player positions of one match at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub match_id: String,
    /// Match metadata, when this snapshot carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldDimensions>,
    pub ball: ObjectPosition,
    pub players: Vec<ObjectPosition>,
}

impl FieldSnapshot {
    /// Latest timestamp over the ball and every player.
    pub fn generation_timestamp(&self) -> u64 {
        self.players
            .iter()
            .map(|p| p.timestamp)
            .fold(self.ball.timestamp, u64::max)
    }
}

/// Emitted whenever the predicted side of the ball changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallFieldSideState {
    pub match_id: String,
    pub generation_timestamp: u64,
    pub ball_on_left_side: bool,
}

/// Flatten positions into the network input layout.
///
/// x is divided by half the field length and y by half the field width, so
/// positions on the field map into [-1, 1]. z is always 0.0.
pub fn encode_positions(
    ball: &ObjectPosition,
    players: &[ObjectPosition],
    field: FieldDimensions,
) -> Vec<f32> {
    let x_scale = field.length / 2.0;
    let y_scale = field.width / 2.0;
    let mut input = Vec::with_capacity((1 + players.len()) * COORDS_PER_OBJECT);
    for object in std::iter::once(ball).chain(players) {
        input.push((object.x / x_scale) as f32);
        input.push((object.y / y_scale) as f32);
        input.push(0.0);
    }
    input
}
