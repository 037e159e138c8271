use crate::lang::ast::Ident;
use std::collections::HashMap;

/// Storage location of a named variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Index into global memory.
    Global(usize),
    /// Frame-relative slot: parameters are negative, locals start at 0.
    Local(isize),
}

#[derive(Debug, Default)]
struct Scope {
    slots: HashMap<Ident, isize>,
    params: isize,
    locals: isize,
}

/// ## Variable symbol table
///
/// Globals are numbered in order of first top-level assignment. While a
/// function scope is open, first assignments allocate locals instead.

#[derive(Debug, Default)]
pub struct Var {
    globals: HashMap<Ident, usize>,
    scopes: Vec<Scope>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Closes the innermost scope and returns its local count.
    pub fn pop_scope(&mut self) -> usize {
        match self.scopes.pop() {
            Some(scope) => scope.locals as usize,
            None => 0,
        }
    }

    pub fn in_function(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// Declares the next parameter. `None` if the name is already a parameter.
    pub fn param(&mut self, name: &Ident) -> Option<isize> {
        let scope = self.scopes.last_mut()?;
        if scope.slots.contains_key(name) {
            return None;
        }
        scope.params += 1;
        let slot = -scope.params;
        scope.slots.insert(name.clone(), slot);
        Some(slot)
    }

    /// Slot written by an assignment, allocating on first use.
    pub fn assign(&mut self, name: &Ident) -> Slot {
        match self.scopes.last_mut() {
            Some(scope) => {
                if let Some(slot) = scope.slots.get(name) {
                    return Slot::Local(*slot);
                }
                let slot = scope.locals;
                scope.locals += 1;
                scope.slots.insert(name.clone(), slot);
                Slot::Local(slot)
            }
            None => {
                let next = self.globals.len();
                Slot::Global(*self.globals.entry(name.clone()).or_insert(next))
            }
        }
    }

    /// Slot read by a reference: the open scope first, then globals.
    pub fn resolve(&self, name: &Ident) -> Option<Slot> {
        if let Some(slot) = self.scopes.last().and_then(|scope| scope.slots.get(name)) {
            return Some(Slot::Local(*slot));
        }
        self.globals.get(name).map(|index| Slot::Global(*index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globals_and_locals() {
        let mut var = Var::new();
        let (x, y, a, b): (Ident, Ident, Ident, Ident) = ("x".into(), "y".into(), "a".into(), "b".into());
        assert_eq!(var.assign(&x), Slot::Global(0));
        assert_eq!(var.assign(&y), Slot::Global(1));
        assert_eq!(var.assign(&x), Slot::Global(0));
        var.push_scope();
        assert_eq!(var.param(&a), Some(-1));
        assert_eq!(var.param(&b), Some(-2));
        assert_eq!(var.param(&a), None);
        assert_eq!(var.resolve(&y), Some(Slot::Global(1)));
        assert_eq!(var.assign(&x), Slot::Local(0));
        assert_eq!(var.assign(&y), Slot::Local(1));
        assert_eq!(var.resolve(&x), Some(Slot::Local(0)));
        assert_eq!(var.resolve(&b), Some(Slot::Local(-2)));
        assert_eq!(var.pop_scope(), 2);
        assert_eq!(var.resolve(&x), Some(Slot::Global(0)));
        assert_eq!(var.resolve(&a), None);
    }
}
