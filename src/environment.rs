use crate::error::{FiaError, Result};
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope.  Closures, the active call and nested blocks may
/// all hold one; the scope lives as long as any of them does.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One runtime scope: name → value, linked to its enclosing scope.  The
/// global scope has no enclosing link.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind a new name in *this* scope.  A name may be defined only once per
    /// scope.
    pub fn define(&mut self, name: &Token, value: Value) -> Result<()> {
        if self.values.contains_key(&name.lexeme) {
            return Err(FiaError::runtime(
                name.line,
                format!("Variable '{}' already exists in this scope.", name.lexeme),
            ));
        }

        debug!("Defining '{}' = {}", name.lexeme, value);

        self.values.insert(name.lexeme.clone(), value);

        Ok(())
    }

    /// Bind a name the interpreter itself owns (`this`), skipping the
    /// define‑once check.  Only used on freshly created scopes.
    pub fn define_internal(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outward through enclosing scopes.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite an existing binding, searching outward.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from the scope exactly `distance` hops out of `env`.
    pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value> {
        let scope: EnvRef = Self::ancestor(env, distance, name)?;
        let value: Option<Value> = scope.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| undefined(name))
    }

    /// Write `name` in the scope exactly `distance` hops out of `env`.
    pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) -> Result<()> {
        let scope: EnvRef = Self::ancestor(env, distance, name)?;
        let mut scope = scope.borrow_mut();

        let assigned: bool = match scope.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        };

        if assigned {
            Ok(())
        } else {
            Err(undefined(name))
        }
    }

    fn ancestor(env: &EnvRef, distance: usize, name: &Token) -> Result<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        for _ in 0..distance {
            let next: EnvRef = match current.borrow().enclosing.as_ref() {
                Some(enclosing) => Rc::clone(enclosing),
                None => {
                    return Err(FiaError::runtime(
                        name.line,
                        format!("No scope {} level(s) out for '{}'.", distance, name.lexeme),
                    ))
                }
            };
            current = next;
        }

        Ok(current)
    }
}

fn undefined(name: &Token) -> FiaError {
    FiaError::runtime(name.line, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::identifier(name, 1)
    }

    #[test]
    fn define_twice_in_same_scope_fails() {
        let mut env = Environment::new();

        env.define(&ident("a"), Value::Number(1.0)).unwrap();
        let err = env.define(&ident("a"), Value::Number(2.0)).unwrap_err();

        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn child_scope_may_shadow_parent() {
        let global = Environment::new().into_ref();
        global
            .borrow_mut()
            .define(&ident("a"), Value::Number(1.0))
            .unwrap();

        let mut child = Environment::with_enclosing(Rc::clone(&global));
        child.define(&ident("a"), Value::Number(2.0)).unwrap();

        assert_eq!(child.get(&ident("a")).unwrap(), Value::Number(2.0));
        assert_eq!(global.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn assign_walks_outward() {
        let global = Environment::new().into_ref();
        global
            .borrow_mut()
            .define(&ident("a"), Value::Number(1.0))
            .unwrap();

        let mut child = Environment::with_enclosing(Rc::clone(&global));
        child.assign(&ident("a"), Value::Number(5.0)).unwrap();

        assert_eq!(global.borrow().get(&ident("a")).unwrap(), Value::Number(5.0));
        assert!(child.assign(&ident("missing"), Value::Nil).is_err());
    }

    #[test]
    fn get_at_uses_exact_distance() {
        let global = Environment::new().into_ref();
        global
            .borrow_mut()
            .define(&ident("x"), Value::String("outer".into()))
            .unwrap();

        let middle = Environment::with_enclosing(Rc::clone(&global)).into_ref();
        middle
            .borrow_mut()
            .define(&ident("x"), Value::String("middle".into()))
            .unwrap();

        let inner = Environment::with_enclosing(Rc::clone(&middle)).into_ref();

        assert_eq!(
            Environment::get_at(&inner, 1, &ident("x")).unwrap(),
            Value::String("middle".into())
        );
        assert_eq!(
            Environment::get_at(&inner, 2, &ident("x")).unwrap(),
            Value::String("outer".into())
        );
        assert!(Environment::get_at(&inner, 0, &ident("x")).is_err());

        Environment::assign_at(&inner, 2, &ident("x"), Value::Bool(true)).unwrap();
        assert_eq!(global.borrow().get(&ident("x")).unwrap(), Value::Bool(true));
    }
}
