//! Nesting state of a writer.

use orbis_types::CoordinateType;

/// Structural context the writer is currently in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    /// Top level of the document. Always at the bottom of the stack.
    Root,
    /// GeoJSON feature collection object.
    FeatureCollection,
    /// GeoJSON feature object.
    Feature,
    /// Array of objects: the features of a collection or the members of a geometry collection.
    ObjectArray,
    /// Geometry object (GeoJSON) or keyword group (WKT).
    Geometry,
    /// Array of positions or of nested position arrays.
    CoordArray,
    /// JSON object property value.
    PropertyMap,
    /// JSON array property value.
    PropertyArray,
}

/// Coordinate type that applies to the next emitted position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActiveType {
    /// An enclosing context pinned the type. It decides which components are printed.
    Pinned(CoordinateType),
    /// Nothing is pinned. The components present on the position decide.
    Inferred,
}

impl ActiveType {
    /// Whether `z` is printed, with `inferred` used when nothing is pinned.
    pub fn is_3d_or(self, inferred: bool) -> bool {
        match self {
            Self::Pinned(coord_type) => coord_type.is_3d(),
            Self::Inferred => inferred,
        }
    }

    /// Whether `m` is printed, with `inferred` used when nothing is pinned.
    pub fn is_measured_or(self, inferred: bool) -> bool {
        match self {
            Self::Pinned(coord_type) => coord_type.is_measured(),
            Self::Inferred => inferred,
        }
    }
}

/// Container, item and coordinate type stacks of a writer.
///
/// `containers` and `has_items` always have the same length and start with the [`Container::Root`] frame, which is
/// never popped. Popping a container that is not the innermost one is a bug in the caller and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterState {
    containers: Vec<Container>,
    has_items: Vec<bool>,
    coord_types: Vec<Option<CoordinateType>>,
}

impl WriterState {
    /// Creates the state with only the root frame.
    pub fn new() -> Self {
        Self {
            containers: vec![Container::Root],
            has_items: vec![false],
            coord_types: Vec::new(),
        }
    }

    /// Enters a container.
    pub fn push(&mut self, container: Container) {
        self.containers.push(container);
        self.has_items.push(false);
    }

    /// Leaves the innermost container, which must be `expected`.
    ///
    /// # Panics
    ///
    /// Panics if only the root frame is left or if the innermost container is not `expected`.
    pub fn pop(&mut self, expected: Container) {
        assert!(
            self.containers.len() > 1,
            "attempt to leave {expected:?} with only the root frame open"
        );

        let popped = self.containers.pop();
        self.has_items.pop();
        assert_eq!(
            popped,
            Some(expected),
            "container stack out of order: {:?}",
            self.containers
        );
    }

    /// Marks that an item is written into the innermost container.
    ///
    /// Returns `true` if the container already had an item, meaning a separator is needed before the new one.
    pub fn mark_item(&mut self) -> bool {
        self.has_items
            .last_mut()
            .is_some_and(|has_items| std::mem::replace(has_items, true))
    }

    /// Innermost container.
    pub fn current(&self) -> Container {
        self.containers.last().copied().unwrap_or(Container::Root)
    }

    /// Container enclosing the innermost one.
    pub fn parent(&self) -> Option<Container> {
        self.containers
            .len()
            .checked_sub(2)
            .map(|index| self.containers[index])
    }

    /// Number of open frames, including the root one.
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// The innermost container is a feature.
    pub fn at_feature(&self) -> bool {
        self.current() == Container::Feature
    }

    /// The innermost container is a feature collection or its `features` array.
    pub fn at_feature_collection(&self) -> bool {
        match self.current() {
            Container::FeatureCollection => true,
            Container::ObjectArray => self.parent() == Some(Container::FeatureCollection),
            _ => false,
        }
    }

    /// Anything besides the root frame is open.
    pub fn not_at_root(&self) -> bool {
        self.containers.len() > 1
    }

    /// Only the root frame is open, or the innermost container is a coordinate array.
    pub fn at_root_or_at_coord_array(&self) -> bool {
        !self.not_at_root() || self.current() == Container::CoordArray
    }

    /// Pins a coordinate type for the enclosed positions. `None` lets the positions decide.
    pub fn push_coord_type(&mut self, coord_type: Option<CoordinateType>) {
        self.coord_types.push(coord_type);
    }

    /// Removes the innermost coordinate type pin.
    ///
    /// # Panics
    ///
    /// Panics if no coordinate type is pushed.
    pub fn pop_coord_type(&mut self) {
        assert!(
            self.coord_types.pop().is_some(),
            "coordinate type stack is empty"
        );
    }

    /// Coordinate type pinned by the nearest enclosing context.
    pub fn active_coord_type(&self) -> ActiveType {
        match self.coord_types.last() {
            Some(Some(coord_type)) => ActiveType::Pinned(*coord_type),
            _ => ActiveType::Inferred,
        }
    }

    /// All containers and coordinate type pins are closed.
    pub fn is_complete(&self) -> bool {
        self.containers.len() == 1 && self.coord_types.is_empty()
    }
}

impl Default for WriterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_item_reports_previous_sibling() {
        let mut state = WriterState::new();
        assert!(!state.mark_item());
        assert!(state.mark_item());

        state.push(Container::CoordArray);
        assert!(!state.mark_item());
        assert!(state.mark_item());
        state.pop(Container::CoordArray);

        assert!(state.mark_item());
        assert!(state.is_complete());
    }

    #[test]
    fn feature_collection_queries() {
        let mut state = WriterState::new();
        assert!(!state.at_feature_collection());
        assert!(state.at_root_or_at_coord_array());

        state.push(Container::FeatureCollection);
        assert!(state.at_feature_collection());
        state.push(Container::ObjectArray);
        assert!(state.at_feature_collection());
        state.push(Container::Feature);
        assert!(state.at_feature());
        assert!(!state.at_feature_collection());
        state.push(Container::Geometry);
        state.push(Container::ObjectArray);
        assert!(!state.at_feature_collection());
        assert!(!state.at_root_or_at_coord_array());
        state.push(Container::CoordArray);
        assert!(state.at_root_or_at_coord_array());
        assert_eq!(state.depth(), 7);
    }

    #[test]
    fn nearest_pin_wins() {
        let mut state = WriterState::new();
        assert_eq!(state.active_coord_type(), ActiveType::Inferred);

        state.push_coord_type(Some(CoordinateType::XYZ));
        state.push_coord_type(Some(CoordinateType::XYM));
        assert_eq!(
            state.active_coord_type(),
            ActiveType::Pinned(CoordinateType::XYM)
        );
        state.push_coord_type(None);
        assert_eq!(state.active_coord_type(), ActiveType::Inferred);
        assert!(!state.is_complete());

        state.pop_coord_type();
        state.pop_coord_type();
        assert_eq!(
            state.active_coord_type(),
            ActiveType::Pinned(CoordinateType::XYZ)
        );
        state.pop_coord_type();
        assert!(state.is_complete());
    }

    #[test]
    fn active_type_fallback() {
        assert!(ActiveType::Inferred.is_3d_or(true));
        assert!(!ActiveType::Pinned(CoordinateType::XYM).is_3d_or(true));
        assert!(ActiveType::Pinned(CoordinateType::XYM).is_measured_or(false));
    }

    #[test]
    #[should_panic(expected = "root frame")]
    fn popping_root_panics() {
        WriterState::new().pop(Container::Root);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn popping_wrong_container_panics() {
        let mut state = WriterState::new();
        state.push(Container::Geometry);
        state.pop(Container::CoordArray);
    }
}
