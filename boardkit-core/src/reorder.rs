/// Geometry-to-position translation for drag gestures.
///
/// Converts a pointer's vertical coordinate and the bounding boxes of the
/// drop candidates into an insertion index, independent of any rendering
/// surface. The dragged item itself is never among the candidates.

/// Vertical extent of one drop candidate, in the same coordinate space as
/// the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub top: f64,
    pub height: f64,
}

impl ItemRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Index of the candidate the dragged item should be inserted before, or
/// `None` when the pointer sits below every candidate's midpoint (append).
///
/// Among candidates whose midpoint lies below the pointer, the one with the
/// offset closest to zero wins: the first item the pointer has risen above.
/// Single linear scan; meant to be re-run on every pointer move so the
/// preview tracks the pointer live.
pub fn insert_before(candidates: &[ItemRect], pointer_y: f64) -> Option<usize> {
    let mut closest: Option<(usize, f64)> = None;
    for (index, rect) in candidates.iter().enumerate() {
        let offset = pointer_y - rect.midpoint();
        if offset < 0.0 && closest.map_or(true, |(_, best)| offset > best) {
            closest = Some((index, offset));
        }
    }
    closest.map(|(index, _)| index)
}

/// Like [`insert_before`], collapsed to a concrete insertion index
/// (`candidates.len()` meaning end of list).
pub fn insertion_index(candidates: &[ItemRect], pointer_y: f64) -> usize {
    insert_before(candidates, pointer_y).unwrap_or(candidates.len())
}

/// Live preview of a list's order while one item is being dragged.
///
/// Mirrors what the presentation layer shows during the gesture: the dragged
/// item is re-slotted on every pointer move, and the index handed to the
/// store on drop is read back from the final preview order. Abandoning the
/// gesture is just dropping the preview; the store is never touched here.
#[derive(Debug, Clone)]
pub struct DragPreview {
    order: Vec<String>,
    dragged: String,
}

impl DragPreview {
    /// Start (or continue) a gesture over `order`, the target list as
    /// currently displayed. When the drag enters a different column,
    /// construct a new preview over that column's list; `order` does not
    /// need to contain the dragged id yet.
    pub fn new(order: Vec<String>, dragged: impl Into<String>) -> Self {
        Self { order, dragged: dragged.into() }
    }

    /// Re-slot the dragged item for the current pointer position. `rects`
    /// are the remaining items' boxes in current preview order, dragged
    /// item excluded.
    pub fn track(&mut self, rects: &[ItemRect], pointer_y: f64) {
        if let Some(current) = self.order.iter().position(|id| id == &self.dragged) {
            self.order.remove(current);
        }
        let index = insertion_index(rects, pointer_y).min(self.order.len());
        self.order.insert(index, self.dragged.clone());
    }

    /// Current preview order, dragged item included once tracked.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Insertion index to hand to the store on drop: the dragged item's
    /// position in the final preview order (end of list if it was never
    /// tracked into this preview).
    pub fn drop_index(&self) -> usize {
        self.order
            .iter()
            .position(|id| id == &self.dragged)
            .unwrap_or(self.order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Candidates with midpoints at y = 100, 200, 300.
    fn three_rects() -> Vec<ItemRect> {
        vec![
            ItemRect::new(75.0, 50.0),
            ItemRect::new(175.0, 50.0),
            ItemRect::new(275.0, 50.0),
        ]
    }

    #[test]
    fn test_pointer_between_items_inserts_before_next() {
        assert_eq!(insert_before(&three_rects(), 150.0), Some(1));
        assert_eq!(insertion_index(&three_rects(), 150.0), 1);
    }

    #[test]
    fn test_pointer_above_all_inserts_first() {
        assert_eq!(insert_before(&three_rects(), 10.0), Some(0));
    }

    #[test]
    fn test_pointer_below_all_appends() {
        assert_eq!(insert_before(&three_rects(), 350.0), None);
        assert_eq!(insertion_index(&three_rects(), 350.0), 3);
    }

    #[test]
    fn test_pointer_exactly_on_midpoint_goes_after() {
        // Zero offset is not negative: the pointer has not risen above it.
        assert_eq!(insert_before(&three_rects(), 200.0), Some(2));
    }

    #[test]
    fn test_empty_candidates_always_append() {
        assert_eq!(insert_before(&[], 123.0), None);
        assert_eq!(insertion_index(&[], 123.0), 0);
    }

    #[test]
    fn test_single_item_list_drag_is_noop() {
        // The only candidate is the dragged item itself, which is excluded.
        let mut preview = DragPreview::new(vec!["a".into()], "a");
        preview.track(&[], 42.0);
        assert_eq!(preview.order(), ["a".to_string()]);
        assert_eq!(preview.drop_index(), 0);
    }

    #[test]
    fn test_live_reorder_tracks_pointer() {
        let mut preview =
            DragPreview::new(vec!["a".into(), "b".into(), "c".into()], "a");

        // Pointer between b's and c's midpoints: [b, a, c]
        preview.track(&three_rects()[..2], 150.0);
        assert_eq!(preview.order(), ["b".to_string(), "a".into(), "c".into()]);
        assert_eq!(preview.drop_index(), 1);

        // Pointer keeps moving past c: [b, c, a]
        preview.track(&three_rects()[..2], 350.0);
        assert_eq!(preview.order(), ["b".to_string(), "c".into(), "a".into()]);
        assert_eq!(preview.drop_index(), 2);

        // And back above everything: [a, b, c]
        preview.track(&three_rects()[..2], 0.0);
        assert_eq!(preview.drop_index(), 0);
    }

    #[test]
    fn test_drag_into_other_column() {
        // Dragged item enters a list that does not contain it yet.
        let mut preview = DragPreview::new(vec!["x".into(), "y".into()], "a");
        assert_eq!(preview.drop_index(), 2);

        preview.track(&three_rects()[..2], 150.0);
        assert_eq!(preview.order(), ["x".to_string(), "a".into(), "y".into()]);
        assert_eq!(preview.drop_index(), 1);
    }
}
