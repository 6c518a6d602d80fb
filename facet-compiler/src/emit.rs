//! Prints the IR as a self-contained JavaScript program.
//!
//! Every scope becomes an arrow function declaring one `let` per binding, named after
//! the scope (eg. `v3_total`), so shadowing and re-entrant closures keep their meaning.
//! Everything the runtime prelude introduces starts with a `$`.

use facet_core::ast::Literal;

use crate::ir::{Callable, Element, Expr, Object, Program, Scope, Slot, SELF_INDEX};

/// The runtime the emitted programs run on.
pub const PRELUDE: &str = include_str!("prelude.js");

/// A module bundled alongside an emitted program, for `system.import` to find.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// The path the module is found under.
    pub path: String,
    /// The module's lowered program.
    pub program: Program,
}

/// Emit a whole script, the prelude followed by the bundled modules and the main program.
pub fn emit(main: &Program, modules: &[Module]) -> String {
    let mut script = String::from(PRELUDE);

    script.push_str("\nconst $bundled = new Map([\n");
    for module in modules {
        let thunk = Emitter::default().program(&module.program);
        script.push_str(&format!("  [{}, {}],\n", js_string(&module.path), thunk));
    }
    script.push_str("]);\n\n");

    let thunk = Emitter::default().program(main);
    script.push_str(&format!("$main({});\n", thunk));
    script
}

/// Emit a single program as an expression evaluating to a thunk.
pub fn emit_program(program: &Program) -> String {
    Emitter::default().program(program)
}

#[derive(Default)]
struct Emitter<'a> {
    scopes: Vec<&'a Scope>,
}

impl<'a> Emitter<'a> {
    fn program(&mut self, program: &'a Program) -> String {
        self.function(&program.scope, &[], &program.body)
    }

    fn scope(&self, depth: usize) -> &'a Scope {
        self.scopes[self.scopes.len() - 1 - depth]
    }

    fn host_name(&self, slot: Slot) -> String {
        self.scope(slot.depth).host_name(slot.index)
    }

    /// `(...$args) => { let ...; <parameters>; return <body>; }`
    ///
    /// A parameter without an argument keeps its `undefined`, loads then fall through to
    /// the enclosing scopes.
    fn function(&mut self, scope: &'a Scope, parameters: &[usize], body: &'a Expr) -> String {
        self.scopes.push(scope);
        let mut text = String::from("(...$args) => { ");
        text.push_str(&declarations(scope, None));
        for (position, &index) in parameters.iter().enumerate() {
            text.push_str(&format!(
                "if ($args.length > {}) {} = $args[{}]; ",
                position,
                scope.host_name(index),
                position
            ));
        }
        text.push_str(&format!("return {}; }}", self.expr(body)));
        self.scopes.pop();
        text
    }

    fn callable(&mut self, callable: &'a Callable) -> String {
        self.function(&callable.scope, &callable.parameters, &callable.body)
    }

    fn expr(&mut self, expr: &'a Expr) -> String {
        match expr {
            Expr::Literal(literal) => js_literal(literal),
            Expr::Load {
                name,
                line,
                candidates,
            } => {
                let fallback = format!("$global({}, {})", js_string(name), line);
                if candidates.is_empty() {
                    return fallback;
                }
                let mut text = String::from("(");
                for slot in candidates {
                    let host = self.host_name(*slot);
                    text.push_str(&format!("{} !== undefined ? {} : ", host, host));
                }
                text.push_str(&fallback);
                text.push(')');
                text
            }
            Expr::Store { index, value } => {
                let host = self.scope(0).host_name(*index);
                format!("({} = {})", host, self.expr(value))
            }
            Expr::Sequence(exprs) => match exprs.as_slice() {
                [] => String::from("null"),
                [only] => self.expr(only),
                [init @ .., last] => {
                    let mut text = String::from("(() => { ");
                    for expr in init {
                        text.push_str(&self.expr(expr));
                        text.push_str("; ");
                    }
                    text.push_str(&format!("return {}; }})()", self.expr(last)));
                    text
                }
            },
            Expr::Send {
                line,
                receiver,
                message,
                arguments,
            } => {
                let receiver = self.expr(receiver);
                let arguments: Vec<String> = arguments.iter().map(|arg| self.expr(arg)).collect();
                format!(
                    "$send({}, {}, [{}], {})",
                    receiver,
                    js_string(message),
                    arguments.join(", "),
                    line
                )
            }
            Expr::Object(object) => self.object(object),
            Expr::Procedure(callable) => format!("$procedure({})", self.callable(callable)),
        }
    }

    fn object(&mut self, object: &'a Object) -> String {
        let scope = &object.scope;
        let this = scope.host_name(SELF_INDEX);
        self.scopes.push(scope);

        let mut text = String::from("(() => { ");
        text.push_str(&declarations(scope, Some("$object()")));
        for (signature, callable) in &object.methods {
            let method = self.callable(callable);
            text.push_str(&format!(
                "$method({}, {}, {}); ",
                this,
                js_string(signature),
                method
            ));
        }
        for element in &object.elements {
            match element {
                Element::Decorate(source) => {
                    let source = self.expr(source);
                    text.push_str(&format!("$decorate({}, {}); ", this, source));
                }
                Element::Define(define) => {
                    text.push_str(&self.expr(define));
                    text.push_str("; ");
                }
                Element::Forward(target) => {
                    let target = self.expr(target);
                    text.push_str(&format!("$forward({}, () => {}); ", this, target));
                }
            }
        }
        text.push_str(&format!("return {}; }})()", this));

        self.scopes.pop();
        text
    }
}

/// `let v1_a, v1_b; `, the first binding optionally initialized.
fn declarations(scope: &Scope, first: Option<&str>) -> String {
    if scope.bindings.is_empty() {
        return String::new();
    }
    let names: Vec<String> = (0..scope.size())
        .map(|index| match (index, first) {
            (0, Some(init)) => format!("{} = {}", scope.host_name(index), init),
            _ => scope.host_name(index),
        })
        .collect();
    format!("let {}; ", names.join(", "))
}

fn js_literal(literal: &Literal) -> String {
    match literal {
        Literal::Number(value) if value.is_sign_negative() => format!("({})", value),
        Literal::Number(value) => value.to_string(),
        Literal::String(value) => js_string(value),
        Literal::Boolean(value) => value.to_string(),
        Literal::Nil => String::from("null"),
    }
}

/// Quote a string as a JavaScript literal.
pub fn js_string(value: &str) -> String {
    let mut text = String::with_capacity(value.len() + 2);
    text.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => text.push_str("\\'"),
            '\\' => text.push_str("\\\\"),
            '\n' => text.push_str("\\n"),
            '\r' => text.push_str("\\r"),
            '\t' => text.push_str("\\t"),
            ch if ch.is_control() || ch == '\u{2028}' || ch == '\u{2029}' => {
                text.push_str(&format!("\\u{{{:x}}}", ch as u32));
            }
            ch => text.push(ch),
        }
    }
    text.push('\'');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_escaped() {
        assert_eq!(js_string("it's"), r"'it\'s'");
        assert_eq!(js_string("a\\b\nc"), r"'a\\b\nc'");
        assert_eq!(js_string("\u{7}"), r"'\u{7}'");
    }

    #[test]
    fn negative_numbers_are_parenthesized() {
        assert_eq!(js_literal(&Literal::Number(-2.5)), "(-2.5)");
        assert_eq!(js_literal(&Literal::Number(3.0)), "3");
        assert_eq!(js_literal(&Literal::Nil), "null");
    }

    #[test]
    fn declarations_can_initialize_self() {
        let scope = Scope::new(4, vec![String::from("self"), String::from("total")]);
        assert_eq!(
            declarations(&scope, Some("$object()")),
            "let v4_self = $object(), v4_total; "
        );
        assert_eq!(declarations(&Scope::new(0, Vec::new()), None), "");
    }
}
