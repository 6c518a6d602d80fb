use std::cell::RefCell;
use std::rc::Rc;

use facet_runtime::Value;

use crate::ir::Slot;

/// Represents a fixed-size frame of slots, chained to the frame it extends.
///
/// A slot stays empty until its definition runs.
#[derive(Debug)]
pub struct Frame {
    parent: Option<Rc<Frame>>,
    slots: RefCell<Vec<Option<Value>>>,
}

impl Frame {
    /// Construct a top-level frame.
    pub fn root(size: usize) -> Rc<Self> {
        Rc::new(Self {
            parent: None,
            slots: RefCell::new(vec![None; size]),
        })
    }

    /// Construct a frame of empty slots chained to `parent`.
    pub fn extend(parent: &Rc<Self>, size: usize) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(parent.clone()),
            slots: RefCell::new(vec![None; size]),
        })
    }

    /// Get the value of a slot, if it was assigned.
    pub fn get(&self, slot: Slot) -> Option<Value> {
        if slot.depth == 0 {
            return self.slots.borrow().get(slot.index).cloned().flatten();
        }
        let outer = Slot {
            depth: slot.depth - 1,
            index: slot.index,
        };
        self.parent.as_ref().and_then(|parent| parent.get(outer))
    }

    /// Assign a slot of this frame.
    pub fn set(&self, index: usize, value: Value) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(index) {
            *slot = Some(value);
        }
    }
}
