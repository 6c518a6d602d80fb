use std::fmt;
use std::rc::Rc;

use crate::instance::{Instance, InstanceKind};
use crate::primitives::Native;

/// Represents a Facet value.
#[derive(Clone)]
pub enum Value {
    /// The **nil** value.
    Nil,
    /// A boolean value (**true** or **false**).
    Boolean(bool),
    /// A number, always a double.
    Number(f64),
    /// A string value.
    String(Rc<String>),
    /// An object or procedure instance.
    Instance(Rc<Instance>),
    /// A host-implemented object.
    Native(Rc<Native>),
}

impl Value {
    /// Construct a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(Rc::new(value.into()))
    }

    /// Get the name of this value's kind, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Instance(instance) => match instance.kind() {
                InstanceKind::Object => "object",
                InstanceKind::Procedure => "procedure",
            },
            Self::Native(native) => native.name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a.eq(b),
            (Self::Number(a), Self::Number(b)) => a.eq(b),
            (Self::String(a), Self::String(b)) => a.eq(b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{}", value),
            Self::Instance(instance) => match instance.kind() {
                InstanceKind::Object => write!(f, "an object"),
                InstanceKind::Procedure => write!(f, "a procedure"),
            },
            Self::Native(native) => write!(f, "{}", native),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "Nil"),
            Self::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Self::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::Instance(instance) => instance.fmt(f),
            Self::Native(native) => f.debug_tuple("Native").field(&native.name()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(9.0).to_string(), "9");
        assert_eq!(Value::Number(-2.5).to_string(), "-2.5");
    }

    #[test]
    fn instances_compare_by_identity() {
        let a = Value::Instance(Rc::new(Instance::new(InstanceKind::Object)));
        let b = Value::Instance(Rc::new(Instance::new(InstanceKind::Object)));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(Value::string("x"), Value::string("x"));
        assert_ne!(Value::Number(1.0), Value::string("1"));
    }
}
