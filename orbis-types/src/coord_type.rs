//! See documentation for [`CoordinateType`].

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Which of the optional `z` (elevation) and `m` (measure) components a value carries.
///
/// Components are always ordered as `x, y, [z], [m]`: when both are present, `z` precedes `m`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CoordinateType {
    /// Only `x` and `y`.
    #[default]
    XY,
    /// `x`, `y` and `z`.
    XYZ,
    /// `x`, `y` and `m`.
    XYM,
    /// `x`, `y`, `z` and `m`.
    XYZM,
}

impl CoordinateType {
    /// Returns the coordinate type with the given set of optional components.
    pub const fn from_flags(is_3d: bool, is_measured: bool) -> Self {
        match (is_3d, is_measured) {
            (false, false) => Self::XY,
            (true, false) => Self::XYZ,
            (false, true) => Self::XYM,
            (true, true) => Self::XYZM,
        }
    }

    /// Whether the `z` component is present.
    pub const fn is_3d(self) -> bool {
        matches!(self, Self::XYZ | Self::XYZM)
    }

    /// Whether the `m` component is present.
    pub const fn is_measured(self) -> bool {
        matches!(self, Self::XYM | Self::XYZM)
    }

    /// Number of numeric components a position of this type has.
    pub const fn dimension(self) -> usize {
        match self {
            Self::XY => 2,
            Self::XYZ | Self::XYM => 3,
            Self::XYZM => 4,
        }
    }

    /// Dimension specifier used by WKT: empty for `XY`, then `Z`, `M` or `ZM`.
    pub const fn specifier(self) -> &'static str {
        match self {
            Self::XY => "",
            Self::XYZ => "Z",
            Self::XYM => "M",
            Self::XYZM => "ZM",
        }
    }

    /// Returns a copy of this type without the `m` component.
    pub const fn without_measure(self) -> Self {
        Self::from_flags(self.is_3d(), false)
    }

    /// Resolves the lowest coordinate type valid for the given `item` and every element of `collection`.
    ///
    /// A type is 3d only if all the examined values are 3d, and measured only if all of them are measured. If
    /// nothing is given, [`CoordinateType::XY`] is returned.
    ///
    /// ```
    /// use orbis_types::CoordinateType;
    ///
    /// let resolved = CoordinateType::resolve(
    ///     Some(&CoordinateType::XYZM),
    ///     [CoordinateType::XYZ, CoordinateType::XYZM],
    /// );
    /// assert_eq!(resolved, CoordinateType::XYZ);
    /// ```
    pub fn resolve<I>(item: Option<&dyn HasCoordinateType>, collection: I) -> Self
    where
        I: IntoIterator,
        I::Item: HasCoordinateType,
    {
        let mut is_3d = true;
        let mut is_measured = true;
        let mut examined = false;

        let types = item
            .map(|item| item.coord_type())
            .into_iter()
            .chain(collection.into_iter().map(|element| element.coord_type()));

        for coord_type in types {
            examined = true;
            is_3d &= coord_type.is_3d();
            is_measured &= coord_type.is_measured();

            if !is_3d && !is_measured {
                break;
            }
        }

        if examined {
            Self::from_flags(is_3d, is_measured)
        } else {
            Self::XY
        }
    }

    /// Same as [`CoordinateType::resolve`] without the separate item.
    pub fn common<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: HasCoordinateType,
    {
        Self::resolve(None, items)
    }
}

impl Display for CoordinateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::XY => "XY",
            Self::XYZ => "XYZ",
            Self::XYM => "XYM",
            Self::XYZM => "XYZM",
        };
        f.write_str(name)
    }
}

/// Anything that knows its [`CoordinateType`].
pub trait HasCoordinateType {
    /// Coordinate type of the value.
    fn coord_type(&self) -> CoordinateType;
}

impl HasCoordinateType for CoordinateType {
    fn coord_type(&self) -> CoordinateType {
        *self
    }
}

impl<T: HasCoordinateType + ?Sized> HasCoordinateType for &T {
    fn coord_type(&self) -> CoordinateType {
        (**self).coord_type()
    }
}

#[cfg(test)]
mod tests {
    use super::CoordinateType::*;
    use super::*;

    #[test]
    fn flags() {
        assert!(!XY.is_3d() && !XY.is_measured());
        assert!(XYZ.is_3d() && !XYZ.is_measured());
        assert!(!XYM.is_3d() && XYM.is_measured());
        assert!(XYZM.is_3d() && XYZM.is_measured());

        for coord_type in [XY, XYZ, XYM, XYZM] {
            assert_eq!(
                CoordinateType::from_flags(coord_type.is_3d(), coord_type.is_measured()),
                coord_type
            );
        }

        assert_eq!(XYM.dimension(), 3);
        assert_eq!(XYZM.specifier(), "ZM");
        assert_eq!(XYZM.without_measure(), XYZ);
    }

    #[test]
    fn resolve_narrows_to_common_type() {
        assert_eq!(CoordinateType::common([XY, XYZ, XYM]), XY);
        assert_eq!(CoordinateType::common([XYZ, XYZ]), XYZ);
        assert_eq!(CoordinateType::common([XYZM, XYM]), XYM);
        assert_eq!(CoordinateType::common([XYZM, XYZ, XYZM]), XYZ);
    }

    #[test]
    fn resolve_empty_is_xy() {
        assert_eq!(CoordinateType::common(Vec::<CoordinateType>::new()), XY);
        assert_eq!(
            CoordinateType::resolve(None, std::iter::empty::<CoordinateType>()),
            XY
        );
    }

    #[test]
    fn resolve_with_item_only() {
        assert_eq!(
            CoordinateType::resolve(Some(&XYM), std::iter::empty::<CoordinateType>()),
            XYM
        );
        assert_eq!(CoordinateType::resolve(Some(&XYZM), [XYZ]), XYZ);
    }

    #[test]
    fn resolve_does_not_depend_on_order() {
        let types = [XYZM, XYZ, XYM, XYZM];
        let mut reversed = types;
        reversed.reverse();
        assert_eq!(
            CoordinateType::common(types),
            CoordinateType::common(reversed)
        );
    }
}
