use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::invokable::{Invoke, Method};
use crate::primitives;
use crate::value::Value;

/// The kind of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    /// Built from an object literal.
    Object,
    /// Built from a procedure, answers `call`.
    Procedure,
}

/// Represents an object or procedure instance.
///
/// The method table is only written to while the instance is being constructed,
/// afterwards it stays fixed for the lifetime of the instance.
pub struct Instance {
    kind: InstanceKind,
    methods: RefCell<IndexMap<String, Method>>,
    forwards: RefCell<Vec<Rc<dyn Invoke>>>,
}

impl Instance {
    /// Construct an empty instance.
    pub fn new(kind: InstanceKind) -> Self {
        Self {
            kind,
            methods: RefCell::new(IndexMap::new()),
            forwards: RefCell::new(Vec::new()),
        }
    }

    /// Get the kind of this instance.
    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    /// Registers a method, unless one already answers that message.
    ///
    /// Returns whether the method got registered.
    pub fn define_method(&self, signature: impl Into<String>, method: Method) -> bool {
        let mut methods = self.methods.borrow_mut();
        let signature = signature.into();
        if methods.contains_key(&signature) {
            return false;
        }
        methods.insert(signature, method);
        true
    }

    /// Search for a method held directly by this instance (no forwarding).
    pub fn lookup_method(&self, signature: &str) -> Option<Method> {
        self.methods.borrow().get(signature).cloned()
    }

    /// Get the number of methods held directly by this instance.
    pub fn method_count(&self) -> usize {
        self.methods.borrow().len()
    }

    /// Records a forwarding target, an invokable that produces the target on each lookup.
    pub fn add_forward(&self, target: Rc<dyn Invoke>) {
        self.forwards.borrow_mut().push(target);
    }

    /// Get the forwarding targets, in declaration order.
    pub fn forwards(&self) -> Vec<Rc<dyn Invoke>> {
        self.forwards.borrow().clone()
    }

    /// Copies the methods of `source` into this instance, skipping messages already answered.
    ///
    /// Instances give away their direct methods only, never what they forward to.
    /// Primitive and native tables are bound to `source` as their receiver.
    /// Returns the number of copied methods.
    pub fn decorate(&self, source: &Value) -> usize {
        let copied: Vec<(String, Method)> = match source {
            Value::Instance(instance) => {
                if std::ptr::eq(instance.as_ref(), self) {
                    return 0;
                }
                instance
                    .methods
                    .borrow()
                    .iter()
                    .map(|(signature, method)| (signature.clone(), method.clone()))
                    .collect()
            }
            value => primitives::method_table(value)
                .unwrap_or(&[])
                .iter()
                .filter(|(signature, _)| *signature != primitives::INTROSPECTION)
                .map(|&(signature, func)| {
                    let method = Method::Primitive {
                        receiver: value.clone(),
                        func,
                    };
                    (String::from(signature), method)
                })
                .collect(),
        };
        let mut count = 0;
        for (signature, method) in copied {
            if self.define_method(signature, method) {
                count += 1;
            }
        }
        count
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("kind", &self.kind)
            .field("methods", &self.methods.borrow().keys())
            .field("forwards", &self.forwards.borrow().len())
            .finish()
    }
}
