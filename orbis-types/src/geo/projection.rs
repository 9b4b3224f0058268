use crate::position::Position;

/// Conversion between geographic positions and projected positions.
///
/// Geographic positions hold longitude in `x` and latitude in `y`. The `z` and `m` components are passed through
/// unchanged. Both methods return `None` if the position cannot be converted.
pub trait Projection {
    /// Geographic to projected.
    fn project(&self, input: &Position) -> Option<Position>;
    /// Projected to geographic.
    fn unproject(&self, input: &Position) -> Option<Position>;
}

/// Replaces `x` and `y` of the position keeping its other components.
pub(crate) fn replace_xy(position: &Position, x: f64, y: f64) -> Option<Position> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    Some(Position::new(x, y, position.opt_z(), position.opt_m()))
}
