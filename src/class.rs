use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use log::{debug, info};

use crate::error::{FiaError, Result};
use crate::function::FiaFunction;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::{Callable, Value};

/// Method name that marks a class's constructor.
pub const INITIALIZER: &str = "init";

/// A class: a name and its methods.  Calling it constructs an instance.
pub struct FiaClass {
    name: String,
    methods: HashMap<String, Rc<FiaFunction>>,
}

impl FiaClass {
    pub fn new(name: String, methods: HashMap<String, Rc<FiaFunction>>) -> Self {
        Self { name, methods }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn find_method(&self, name: &str) -> Option<&Rc<FiaFunction>> {
        self.methods.get(name)
    }

    /// The initializer's arity, or zero without one.
    pub fn arity(&self) -> usize {
        self.find_method(INITIALIZER).map_or(0, |init| init.arity())
    }

    /// Allocate an instance and run `init` on it, if there is one.  The
    /// result is always the instance, whatever `init` itself returns.
    pub fn instantiate<W: Write>(
        class: &Rc<FiaClass>,
        interpreter: &mut Interpreter<W>,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        info!("Instantiating class '{}'", class.name);

        let instance: Rc<FiaInstance> = Rc::new(FiaInstance::new(Rc::clone(class)));

        if let Some(init) = class.find_method(INITIALIZER) {
            init.bind(Rc::clone(&instance))
                .call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for FiaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

/// An object: its class plus an open set of fields, created on first
/// assignment.
pub struct FiaInstance {
    class: Rc<FiaClass>,
    fields: RefCell<HashMap<String, Value>>,
}

impl FiaInstance {
    pub fn new(class: Rc<FiaClass>) -> Self {
        Self {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    pub fn class(&self) -> &Rc<FiaClass> {
        &self.class
    }

    /// Property read: a stored field wins over a method of the same name;
    /// methods come back bound to this instance.
    pub fn get(instance: &Rc<FiaInstance>, name: &Token) -> Result<Value> {
        if let Some(value) = instance.fields.borrow().get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = instance.class.find_method(&name.lexeme) {
            let bound: FiaFunction = method.bind(Rc::clone(instance));
            return Ok(Value::Callable(Callable::Function(Rc::new(bound))));
        }

        Err(FiaError::runtime(
            name.line,
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    pub fn set(&self, name: &Token, value: Value) {
        debug!("Setting field '{}' on {} instance", name.lexeme, self.class.name);

        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for FiaInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.class.name)
    }
}
