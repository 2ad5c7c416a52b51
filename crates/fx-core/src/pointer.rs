//! Shared pointer position: one writer (the pointer-move handler), any
//! number of readers (particle field, magnetic and follow effects).

use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    /// False until the first pointer-move notification.
    pub seen: bool,
}

/// Create the writer/reader pair for a page.
pub fn pointer_channel() -> (PointerWriter, PointerReader) {
    let cell = Rc::new(Cell::new(PointerState::default()));
    (
        PointerWriter { cell: cell.clone() },
        PointerReader { cell },
    )
}

/// Exclusive write access. Not `Clone`, so there is exactly one writer.
#[derive(Debug)]
pub struct PointerWriter {
    cell: Rc<Cell<PointerState>>,
}

impl PointerWriter {
    /// Last writer wins; non-finite coordinates are ignored.
    pub fn set(&self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.cell.set(PointerState {
            pos: Vec2::new(x, y),
            seen: true,
        });
    }

    pub fn reader(&self) -> PointerReader {
        PointerReader {
            cell: self.cell.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PointerReader {
    cell: Rc<Cell<PointerState>>,
}

impl PointerReader {
    #[inline]
    pub fn get(&self) -> PointerState {
        self.cell.get()
    }

    /// Position if the pointer has been seen at least once.
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        let s = self.cell.get();
        s.seen.then_some(s.pos)
    }
}
