use super::{Symbol, Var};
use crate::error;
use crate::lang::ast::{AcceptVisitor, Ident, Statement, Visitor};
use crate::lang::{Column, Error};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Declared function
///
/// Everything a call site needs before the body has been placed.

#[derive(Debug, Clone)]
pub struct Function<'a> {
    name: Ident,
    symbol: Symbol,
    params: &'a [Ident],
    body: &'a [Statement],
    locals: usize,
}

impl<'a> Function<'a> {
    pub fn name(&self) -> &Ident {
        &self.name
    }
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
    pub fn params(&self) -> &'a [Ident] {
        self.params
    }
    pub fn body(&self) -> &'a [Statement] {
        self.body
    }
    pub fn arity(&self) -> usize {
        self.params.len()
    }
    pub fn locals(&self) -> usize {
        self.locals
    }
}

struct LocalCounter<'v> {
    var: &'v mut Var,
}

impl<'v> Visitor for LocalCounter<'v> {
    fn visit_statement(&mut self, stmt: &Statement) {
        if let Statement::Assign(_, name, _) = stmt {
            self.var.assign(name);
        }
    }
}

/// Number of distinct non-parameter names assigned in a function body.
fn count_locals(params: &[Ident], body: &[Statement]) -> usize {
    let mut var = Var::new();
    var.push_scope();
    for param in params {
        var.param(param);
    }
    let mut counter = LocalCounter { var: &mut var };
    for stmt in body {
        stmt.accept(&mut counter);
    }
    var.pop_scope()
}

/// Functions in declaration order, indexed by name. A function's symbol
/// is its position in declaration order.
#[derive(Debug, Default)]
pub struct Functions<'a> {
    list: Vec<Function<'a>>,
    names: HashMap<Ident, usize>,
}

impl<'a> Functions<'a> {
    pub fn new() -> Functions<'a> {
        Functions {
            list: vec![],
            names: HashMap::new(),
        }
    }

    pub fn declare(
        &mut self,
        col: &Column,
        name: &Ident,
        params: &'a [Ident],
        body: &'a [Statement],
    ) -> Result<Symbol> {
        if self.names.contains_key(name) {
            return Err(error!(SyntaxError, ..col; &format!("DUPLICATE FUNCTION {}", name)));
        }
        let symbol = self.list.len();
        self.list.push(Function {
            name: name.clone(),
            symbol,
            params,
            body,
            locals: count_locals(params, body),
        });
        self.names.insert(name.clone(), symbol);
        Ok(symbol)
    }

    pub fn get(&self, name: &Ident) -> Option<&Function<'a>> {
        self.names.get(name).and_then(|index| self.list.get(*index))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Function<'a>> {
        self.list.iter()
    }
}
