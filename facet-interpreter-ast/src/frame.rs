use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use facet_runtime::Value;

/// Represents an environment frame, chained to the frame it extends.
///
/// Instances and procedures keep a handle to the frame they were built in,
/// so later defines in that frame stay visible to them.
#[derive(Debug, Default)]
pub struct Frame {
    parent: Option<Rc<Frame>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Frame {
    /// Construct a top-level frame.
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Construct an empty frame chained to `parent`.
    pub fn extend(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(parent.clone()),
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Bind a value in this frame only, overwriting any previous binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Search for a binding, walking the chain outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }
}
