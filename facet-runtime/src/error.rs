use facet_parser::ParseError;

/// Represents a failure while running Facet code.
///
/// Every error unwinds the whole evaluation unit, the language has no way to recover from one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No method answers the message, at any level of resolution.
    #[error("{receiver} does not understand '{message}'{}", at_line(.line))]
    MessageNotUnderstood {
        /// The kind of the receiver (eg. `number` or `object`).
        receiver: String,
        /// The message that was sent.
        message: String,
        /// The line of the failing send, when known.
        line: Option<usize>,
    },
    /// A variable lookup exhausted the environment chain and the globals.
    #[error("unbound variable '{name}'{}", at_line(.line))]
    UnboundVariable {
        /// The variable's name.
        name: String,
        /// The line of the variable reference, when known.
        line: Option<usize>,
    },
    /// An operand could not be converted to the kind a primitive needs.
    #[error("cannot coerce {value} to a {kind}")]
    CoercionFailure {
        /// The wanted primitive kind.
        kind: String,
        /// A description of the offending value.
        value: String,
    },
    /// A native method signalled a failure.
    #[error("{0}")]
    NativeFailure(String),
    /// A chain of forwards got too long while resolving a message.
    #[error("forwarding chain too deep while resolving '{message}'")]
    ForwardingTooDeep {
        /// The message being resolved.
        message: String,
    },
    /// Some source text could not be parsed.
    #[error("parse error at {0}")]
    Parse(#[from] ParseError),
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

impl Error {
    /// Attaches a source line to this error, unless a more precise one is already known.
    pub fn at(self, line: usize) -> Self {
        match self {
            Self::MessageNotUnderstood {
                receiver,
                message,
                line: None,
            } => Self::MessageNotUnderstood {
                receiver,
                message,
                line: Some(line),
            },
            Self::UnboundVariable { name, line: None } => Self::UnboundVariable {
                name,
                line: Some(line),
            },
            error => error,
        }
    }

    /// Construct a native failure.
    pub fn native(detail: impl Into<String>) -> Self {
        Self::NativeFailure(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_line_wins() {
        let error = Error::MessageNotUnderstood {
            receiver: String::from("nil"),
            message: String::from("size"),
            line: None,
        };
        let error = error.at(4).at(1);
        assert_eq!(error.to_string(), "nil does not understand 'size' (line 4)");
    }

    #[test]
    fn lineless_display() {
        let error = Error::UnboundVariable {
            name: String::from("x"),
            line: None,
        };
        assert_eq!(error.to_string(), "unbound variable 'x'");
        assert_eq!(Error::native("boom").at(3), Error::native("boom"));
    }
}
