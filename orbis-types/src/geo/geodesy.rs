use ::geodesy::prelude::*;

use crate::error::TypesError;
use crate::geo::projection::{replace_xy, Projection};
use crate::position::Position;

/// Projection defined by a `geodesy` operator string, e.g. `"merc"` or `"laea lon_0=10 lat_0=52"`.
pub struct GeodesyProjection {
    context: Minimal,
    op: OpHandle,
}

impl GeodesyProjection {
    /// Parses the definition and creates the projection.
    pub fn new(definition: &str) -> Result<Self, TypesError> {
        let mut context = Minimal::new();
        let op = context
            .op(definition)
            .map_err(|err| TypesError::Projection(err.to_string()))?;

        Ok(Self { context, op })
    }
}

impl std::fmt::Debug for GeodesyProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeodesyProjection").finish_non_exhaustive()
    }
}

impl Projection for GeodesyProjection {
    fn project(&self, input: &Position) -> Option<Position> {
        let mut data = [Coor2D::geo(input.y(), input.x())];
        self.context.apply(self.op, Fwd, &mut data).ok()?;

        replace_xy(input, data[0].0[0], data[0].0[1])
    }

    fn unproject(&self, input: &Position) -> Option<Position> {
        let mut data = [Coor2D([input.x(), input.y()])];
        self.context.apply(self.op, Inv, &mut data).ok()?;

        replace_xy(input, data[0].0[0].to_degrees(), data[0].0[1].to_degrees())
    }
}
