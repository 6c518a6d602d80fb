use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use facet_core::ast::Term;

use crate::error::Error;
use crate::instance::Instance;
use crate::invokable::{Backend, Invoke, Method};
use crate::primitives;
use crate::value::Value;

/// The maximum number of forwarding hops followed while resolving a message.
pub const MAX_FORWARD_DEPTH: usize = 256;

/// The extension appended to module identifiers that lack one.
pub const MODULE_EXTENSION: &str = "facet";

/// The runtime's main data structure.
///
/// It owns the globals, the module cache, the I/O endpoints of the natives
/// and the backend used to run imported modules.
pub struct Universe {
    /// Map of known globals.
    pub globals: IndexMap<String, Value>,
    /// Directories searched for imported modules.
    pub search_paths: Vec<PathBuf>,
    modules: HashMap<PathBuf, Value>,
    loading: Vec<PathBuf>,
    backend: Rc<dyn Backend>,
    output: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl Universe {
    /// Initialize the universe with the given backend.
    pub fn new(backend: Rc<dyn Backend>) -> Self {
        Self::with_search_paths(backend, Vec::new())
    }

    /// Initialize the universe with the given backend and module search paths.
    pub fn with_search_paths(backend: Rc<dyn Backend>, search_paths: Vec<PathBuf>) -> Self {
        let globals = primitives::globals()
            .into_iter()
            .map(|(name, value)| (String::from(name), value))
            .collect();

        Self {
            globals,
            search_paths,
            modules: HashMap::new(),
            loading: Vec::new(),
            backend,
            output: Box::new(io::stdout()),
            input: Box::new(io::BufReader::new(io::stdin())),
        }
    }

    /// Replace the sink written to by the natives.
    pub fn set_output(&mut self, output: impl Write + 'static) {
        self.output = Box::new(output);
    }

    /// Replace the source read from by the natives.
    pub fn set_input(&mut self, input: impl BufRead + 'static) {
        self.input = Box::new(input);
    }

    /// Write some text to the output sink.
    pub fn write_output(&mut self, text: &str) -> Result<(), Error> {
        self.output
            .write_all(text.as_bytes())
            .map_err(|err| Error::native(format!("could not write output: {}", err)))
    }

    /// Flush the output sink.
    pub fn flush_output(&mut self) -> Result<(), Error> {
        self.output
            .flush()
            .map_err(|err| Error::native(format!("could not flush output: {}", err)))
    }

    /// Read a line from the input source, without its line terminator.
    pub fn read_input_line(&mut self) -> Result<Option<String>, Error> {
        self.flush_output()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|err| Error::native(format!("could not read input: {}", err)))?;
        if read == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Search for a global binding.
    pub fn lookup_global(&self, name: impl AsRef<str>) -> Option<Value> {
        self.globals.get(name.as_ref()).cloned()
    }

    /// Get the backend running programs within this universe.
    pub fn backend(&self) -> Rc<dyn Backend> {
        self.backend.clone()
    }

    /// Runs a program through the active backend, in a fresh top-level environment.
    pub fn execute(&mut self, program: &Term) -> Result<Value, Error> {
        let backend = self.backend.clone();
        backend.execute(self, program)
    }

    /// Parses and runs some source text.
    pub fn run_source(&mut self, source: &str) -> Result<Value, Error> {
        let program = facet_parser::parse_program(source)?;
        self.execute(&program)
    }

    /// Sends a message to a receiver, with already-evaluated arguments.
    pub fn send(
        &mut self,
        receiver: Value,
        signature: &str,
        args: Vec<Value>,
    ) -> Result<Value, Error> {
        trace!(receiver = receiver.kind(), signature, args = args.len(), "send");
        match self.lookup_method(&receiver, signature)? {
            Some(method) => method.invoke(self, args),
            None => Err(Error::MessageNotUnderstood {
                receiver: String::from(receiver.kind()),
                message: String::from(signature),
                line: None,
            }),
        }
    }

    /// Search for the method answering a message for a given receiver.
    ///
    /// Forwarding targets are re-evaluated on each lookup.
    pub fn lookup_method(
        &mut self,
        receiver: &Value,
        signature: &str,
    ) -> Result<Option<Method>, Error> {
        self.resolve(receiver, signature, 0)
    }

    fn resolve(
        &mut self,
        receiver: &Value,
        signature: &str,
        depth: usize,
    ) -> Result<Option<Method>, Error> {
        match receiver {
            Value::Instance(instance) => self.resolve_instance(instance, signature, depth),
            Value::Native(_) if signature == primitives::INTROSPECTION => Ok(None),
            value => {
                let method = primitives::method_table(value)
                    .and_then(|table| primitives::lookup(table, signature))
                    .map(|func| Method::Primitive {
                        receiver: value.clone(),
                        func,
                    });
                Ok(method)
            }
        }
    }

    fn resolve_instance(
        &mut self,
        instance: &Rc<Instance>,
        signature: &str,
        depth: usize,
    ) -> Result<Option<Method>, Error> {
        if let Some(method) = instance.lookup_method(signature) {
            return Ok(Some(method));
        }
        for forward in instance.forwards() {
            if depth >= MAX_FORWARD_DEPTH {
                return Err(Error::ForwardingTooDeep {
                    message: String::from(signature),
                });
            }
            let target = forward.invoke(self, Vec::new())?;
            trace!(signature, target = target.kind(), depth, "forward");
            if let Some(method) = self.resolve(&target, signature, depth + 1)? {
                return Ok(Some(method));
            }
        }
        Ok(None)
    }

    /// Resolve a module identifier to a canonical path.
    ///
    /// The identifier is tried as-is, then relative to each search path.
    pub fn resolve_module(&self, id: &str) -> Option<PathBuf> {
        let mut relative = PathBuf::from(id);
        if relative.extension().is_none() {
            relative.set_extension(MODULE_EXTENSION);
        }
        std::iter::once(Path::new("."))
            .chain(self.search_paths.iter().map(PathBuf::as_path))
            .map(|directory| directory.join(&relative))
            .find(|path| path.is_file())
            .and_then(|path| path.canonicalize().ok())
    }

    /// Imports a module, running it only the first time it is requested.
    pub fn import(&mut self, id: &str) -> Result<Value, Error> {
        let path = self
            .resolve_module(id)
            .ok_or_else(|| Error::native(format!("could not find module '{}'", id)))?;

        if let Some(value) = self.modules.get(&path) {
            debug!(path = %path.display(), "module cache hit");
            return Ok(value.clone());
        }
        if self.loading.contains(&path) {
            return Err(Error::native(format!(
                "import cycle through '{}'",
                path.display()
            )));
        }
        debug!(path = %path.display(), "module cache miss");

        let source = fs::read_to_string(&path).map_err(|err| {
            Error::native(format!("could not read '{}': {}", path.display(), err))
        })?;
        let program = facet_parser::parse_program(&source)?;

        self.loading.push(path.clone());
        let output = self.execute(&program);
        self.loading.pop();

        let value = output?;
        self.modules.insert(path, value.clone());
        Ok(value)
    }

    /// Get the number of modules currently cached.
    pub fn cached_modules(&self) -> usize {
        self.modules.len()
    }
}

/// An output sink keeping everything written to it, readable from a cloned handle.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    /// Construct an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
