use std::fmt;
use std::io::Write;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::class::FiaInstance;
use crate::environment::{EnvRef, Environment};
use crate::error::Result;
use crate::interpreter::{Flow, Interpreter};
use crate::token::Token;
use crate::value::Value;

/// Name under which a bound method sees its receiver.
pub const THIS: &str = "this";

/// A user‑defined function or method: its declaration plus the scope that was
/// active where it was declared (the closure).
pub struct FiaFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
    is_initializer: bool,
}

impl FiaFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// A copy of this method whose closure is a fresh scope defining `this`.
    /// The original method is left untouched.
    pub fn bind(&self, instance: Rc<FiaInstance>) -> FiaFunction {
        debug!(
            "Binding method '{}' to {} instance",
            self.name(),
            instance.class().name()
        );

        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define_internal(THIS, Value::Instance(instance));

        FiaFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment.into_ref(),
            is_initializer: self.is_initializer,
        }
    }

    /// Run the body in a new scope enclosed by the closure (not the caller's
    /// scope), with each parameter bound to its argument.
    pub fn call<W: Write>(
        &self,
        interpreter: &mut Interpreter<W>,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        debug!(
            "Calling '{}' with {} argument(s)",
            self.name(),
            arguments.len()
        );

        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param, argument)?;
        }

        let flow: Flow = interpreter.execute_block(&self.declaration.body, environment.into_ref())?;

        // An initializer always hands back its instance.
        if self.is_initializer {
            let this = Token::identifier(THIS, self.declaration.name.line);
            return Environment::get_at(&self.closure, 0, &this);
        }

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Nil,
        })
    }
}

impl fmt::Debug for FiaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<func {}>", self.name())
    }
}
