use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// A shared handle to one lexical scope. Cloning the handle aliases the same
/// scope, which is what gives closures reference semantics: a binding mutated
/// after capture is observed through every handle.
#[derive(Debug, Clone)]
pub struct Environment {
    core: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            core: Rc::new(RefCell::new(EnvironmentCore::default())),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            core: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Walks the scope chain outward; the builtin table is the last resort.
    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        let core = self.core.borrow();
        core.store
            .get(key)
            .cloned()
            .or_else(|| core.outer.as_ref().and_then(|outer| outer.get(key)))
            .or_else(|| crate::builtins::lookup(key).map(Object::builtin))
    }

    /// Always writes the innermost scope.
    pub fn set(&mut self, key: Rc<str>, value: Rc<Object>) {
        self.core.borrow_mut().store.insert(key, value);
    }

}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Identity comparison: two handles are equal when they alias the same scope.
// Comparing contents would recurse through closure capture cycles.
impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_outward() {
        let mut outer = Environment::new();
        outer.set("x".into(), Object::integer(1));
        outer.set("y".into(), Object::integer(2));

        let mut inner = Environment::new_enclosed(outer.clone());
        inner.set("x".into(), Object::integer(10));

        assert_eq!(inner.get("x"), Some(Object::integer(10)));
        assert_eq!(inner.get("y"), Some(Object::integer(2)));
        assert_eq!(inner.get("z"), None);
        // The shadowing binding stays in the inner scope.
        assert_eq!(outer.get("x"), Some(Object::integer(1)));
    }

    #[test]
    fn test_enclosed_environment_shares_the_outer() {
        let outer = Environment::new();
        let inner = Environment::new_enclosed(outer.clone());

        let mut handle = outer.clone();
        handle.set("late".into(), Object::boolean(true));

        assert_eq!(inner.get("late"), Some(Object::boolean(true)));
    }

    #[test]
    fn test_builtins_resolve_as_a_fallback() {
        let mut env = Environment::new();
        assert!(matches!(
            env.get("len").as_deref(),
            Some(Object::Builtin(_))
        ));

        // A user binding shadows the builtin.
        env.set("len".into(), Object::integer(3));
        assert_eq!(env.get("len"), Some(Object::integer(3)));
    }
}
