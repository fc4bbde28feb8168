//! Undo stack for vertex edits.
//!
//! Only two edits are undoable: appending a vertex and deleting one. An
//! append is recorded as [`EditBatch::Added`] and undone by popping the last
//! vertex. A deletion records the removed vertices and is undone by
//! appending them at the end of the shape, not at their original index.

use bez_core::{BezierShape, Vertices};

#[derive(Debug, Clone, PartialEq)]
pub enum EditBatch {
    /// One vertex was appended.
    Added,
    /// These vertices were removed.
    Removed(Vertices),
}

#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: Vec<EditBatch>,
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Unbounded stack.
    pub fn new() -> Self {
        Self::with_max_depth(usize::MAX)
    }

    /// Stack that forgets its oldest entry past `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn push(&mut self, batch: EditBatch) {
        self.entries.push(batch);
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Revert the most recent edit on `shape`. Returns the reverted batch,
    /// or `None` when there is nothing to undo.
    pub fn undo(&mut self, shape: &mut BezierShape) -> Option<EditBatch> {
        let batch = self.entries.pop()?;
        match &batch {
            EditBatch::Added => {
                shape.pop();
            }
            EditBatch::Removed(vertices) => shape.concat(vertices.iter().copied()),
        }
        log::debug!("undo {batch:?}, {} left", self.entries.len());
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bez_core::Vertex;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_added_pops() {
        let mut shape = BezierShape::from_vertices(vec![Vertex::new(0.0, 0.0), Vertex::new(1.0, 1.0)]);
        let mut stack = UndoStack::new();
        stack.push(EditBatch::Added);
        assert_eq!(stack.undo(&mut shape), Some(EditBatch::Added));
        assert_eq!(shape.vertices(), &[Vertex::new(0.0, 0.0)]);
        assert_eq!(stack.undo(&mut shape), None);
    }

    #[test]
    fn undo_removed_appends_at_end() {
        let mut shape = BezierShape::from_vertices(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(2.0, 2.0),
        ]);
        let mut stack = UndoStack::new();
        let removed = shape.splice(0, Some(1), []);
        stack.push(EditBatch::Removed(removed));
        stack.undo(&mut shape);
        assert_eq!(
            shape.vertices(),
            &[Vertex::new(1.0, 1.0), Vertex::new(2.0, 2.0), Vertex::new(0.0, 0.0)]
        );
    }

    #[test]
    fn max_depth_drops_oldest() {
        let mut stack = UndoStack::with_max_depth(2);
        stack.push(EditBatch::Removed(vec![Vertex::new(9.0, 9.0)]));
        stack.push(EditBatch::Added);
        stack.push(EditBatch::Added);
        assert_eq!(stack.len(), 2);

        let mut shape = BezierShape::from_vertices(vec![Vertex::new(0.0, 0.0); 3]);
        stack.undo(&mut shape);
        stack.undo(&mut shape);
        assert!(stack.is_empty());
        assert_eq!(shape.n_vertices(), 1);
    }
}
