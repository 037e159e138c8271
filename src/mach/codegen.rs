use super::{Address, Function, Functions, Link, Listing, Opcode, Slot, Var, Word};
use crate::error;
use crate::lang::ast::{Expression, Ident, Statement};
use crate::lang::{Column, Error};
use log::debug;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Lowers a syntax tree to linked assembly.
///
/// The main program comes first and ends with `HALT`. Function bodies
/// follow in declaration order, each in its own section. Every error
/// found along the way is reported.
pub fn codegen(ast: &[Statement]) -> std::result::Result<Listing, Vec<Error>> {
    Generator::generate(ast)
}

fn op(opcode: Opcode) -> Word {
    Word::Opcode(opcode)
}

fn int(n: i32) -> Word {
    Word::Int(n)
}

fn address(addr: Address) -> Result<Word> {
    match i32::try_from(addr) {
        Ok(n) => Ok(Word::Int(n)),
        Err(_) => Err(error!(Overflow; "PROGRAM TOO LARGE")),
    }
}

struct Generator<'a> {
    var: Var,
    functions: Functions<'a>,
    link: Link,
    errors: Vec<Error>,
}

impl<'a> Generator<'a> {
    fn generate(ast: &'a [Statement]) -> std::result::Result<Listing, Vec<Error>> {
        let mut this = Generator {
            var: Var::new(),
            functions: Functions::new(),
            link: Link::new(),
            errors: vec![],
        };
        this.declare(ast);
        let mut listing = Listing::new();

        let mut main = this.block(ast, 0);
        main.push(op(Opcode::Halt));
        this.place(&mut listing, main);

        let functions: Vec<Function<'a>> = this.functions.iter().cloned().collect();
        for function in functions {
            this.function(&mut listing, &function);
        }

        let mut errors = std::mem::take(&mut this.errors);
        errors.append(&mut this.link.link(listing.words_mut()));
        if errors.is_empty() {
            Ok(listing)
        } else {
            Err(errors)
        }
    }

    fn place(&mut self, listing: &mut Listing, mut words: Vec<Word>) {
        self.link.scan(listing.len(), &words);
        listing.append(&mut words);
    }

    /// Registers every function, nested ones included, before any code is emitted.
    fn declare(&mut self, ast: &'a [Statement]) {
        for statement in ast {
            match statement {
                Statement::Function(col, name, params, body) => {
                    if let Err(error) = self.functions.declare(col, name, params, body) {
                        self.errors.push(error);
                    }
                    self.declare(body);
                }
                Statement::If(_, _, then, otherwise) => {
                    self.declare(then);
                    self.declare(otherwise);
                }
                Statement::While(_, _, body) | Statement::For(_, _, _, _, body) => {
                    self.declare(body)
                }
                _ => {}
            }
        }
    }

    fn function(&mut self, listing: &mut Listing, function: &Function<'a>) {
        let addr = listing.len();
        debug!("placing {} at {}", function.name(), addr);
        self.link.insert(function.symbol(), addr);
        listing.section(function.name());
        self.var.push_scope();
        for param in function.params() {
            if self.var.param(param).is_none() {
                let message = format!("DUPLICATE PARAMETER {}", param);
                self.errors.push(error!(SyntaxError; &message));
            }
        }
        let mut body = self.block(function.body(), addr);
        if !matches!(function.body().last(), Some(Statement::Return(..))) {
            body.extend_from_slice(&[op(Opcode::Const), int(-1), op(Opcode::Ret)]);
        }
        self.var.pop_scope();
        self.place(listing, body);
    }

    fn block(&mut self, statements: &'a [Statement], addr: Address) -> Vec<Word> {
        let mut words = vec![];
        for statement in statements {
            match self.statement(statement, addr + words.len()) {
                Ok(mut code) => words.append(&mut code),
                Err(error) => self.errors.push(error),
            }
        }
        words
    }

    fn statement(&mut self, statement: &'a Statement, addr: Address) -> Result<Vec<Word>> {
        match statement {
            Statement::Assign(col, name, expr) => self.r#assign(col, name, expr),
            Statement::Expression(_, expr) => {
                let mut words = self.expression(expr)?;
                words.push(op(Opcode::Pop));
                Ok(words)
            }
            Statement::For(_, init, predicate, step, body) => {
                self.r#for(addr, init, predicate, step, body)
            }
            Statement::Function(..) => Ok(vec![]),
            Statement::If(_, predicate, then, otherwise) => {
                self.r#if(addr, predicate, then, otherwise)
            }
            Statement::Print(_, expr) => {
                let mut words = self.expression(expr)?;
                words.push(op(Opcode::Print));
                Ok(words)
            }
            Statement::Return(col, expr) => self.r#return(col, expr),
            Statement::While(_, predicate, body) => self.r#while(addr, predicate, body),
        }
    }

    fn r#assign(&mut self, col: &Column, name: &Ident, expr: &Expression) -> Result<Vec<Word>> {
        let mut words = self.expression(expr)?;
        match self.var.assign(name) {
            Slot::Local(slot) => match i32::try_from(slot) {
                Ok(slot) => words.extend_from_slice(&[op(Opcode::Store), int(slot)]),
                Err(_) => return Err(error!(Overflow, ..col; "TOO MANY LOCALS")),
            },
            Slot::Global(index) => match i32::try_from(index) {
                Ok(index) => words.extend_from_slice(&[op(Opcode::Gstore), int(index)]),
                Err(_) => return Err(error!(Overflow, ..col; "TOO MANY GLOBALS")),
            },
        }
        Ok(words)
    }

    fn r#if(
        &mut self,
        addr: Address,
        predicate: &Expression,
        then: &'a [Statement],
        otherwise: &'a [Statement],
    ) -> Result<Vec<Word>> {
        let mut words = self.expression(predicate)?;
        let then_addr = addr + words.len() + 3;
        let mut then_words = self.block(then, then_addr);
        if otherwise.is_empty() {
            let end = then_addr + then_words.len();
            words.extend_from_slice(&[op(Opcode::Const), address(end)?, op(Opcode::Jmpf)]);
            words.append(&mut then_words);
        } else {
            let else_addr = then_addr + then_words.len() + 3;
            let mut else_words = self.block(otherwise, else_addr);
            let end = else_addr + else_words.len();
            words.extend_from_slice(&[op(Opcode::Const), address(else_addr)?, op(Opcode::Jmpf)]);
            words.append(&mut then_words);
            words.extend_from_slice(&[op(Opcode::Const), address(end)?, op(Opcode::Jmp)]);
            words.append(&mut else_words);
        }
        Ok(words)
    }

    fn r#while(
        &mut self,
        addr: Address,
        predicate: &Expression,
        body: &'a [Statement],
    ) -> Result<Vec<Word>> {
        let mut words = self.expression(predicate)?;
        let body_addr = addr + words.len() + 3;
        let mut body_words = self.block(body, body_addr);
        let exit = body_addr + body_words.len() + 3;
        words.extend_from_slice(&[op(Opcode::Const), address(exit)?, op(Opcode::Jmpf)]);
        words.append(&mut body_words);
        words.extend_from_slice(&[op(Opcode::Const), address(addr)?, op(Opcode::Jmp)]);
        Ok(words)
    }

    fn r#for(
        &mut self,
        addr: Address,
        init: &'a Statement,
        predicate: &Expression,
        step: &'a Statement,
        body: &'a [Statement],
    ) -> Result<Vec<Word>> {
        let mut words = self.statement(init, addr)?;
        let predicate_addr = addr + words.len();
        words.append(&mut self.expression(predicate)?);
        let body_addr = addr + words.len() + 3;
        let mut body_words = self.block(body, body_addr);
        let mut step_words = self.statement(step, body_addr + body_words.len())?;
        let exit = body_addr + body_words.len() + step_words.len() + 3;
        words.extend_from_slice(&[op(Opcode::Const), address(exit)?, op(Opcode::Jmpf)]);
        words.append(&mut body_words);
        words.append(&mut step_words);
        words.extend_from_slice(&[op(Opcode::Const), address(predicate_addr)?, op(Opcode::Jmp)]);
        Ok(words)
    }

    fn r#return(&mut self, col: &Column, expr: &Option<Expression>) -> Result<Vec<Word>> {
        if !self.var.in_function() {
            return Err(error!(SyntaxError, ..col; "RETURN OUTSIDE FUNCTION"));
        }
        let mut words = match expr {
            Some(expr) => self.expression(expr)?,
            None => vec![op(Opcode::Const), int(-1)],
        };
        words.push(op(Opcode::Ret));
        Ok(words)
    }

    fn expression(&mut self, expr: &Expression) -> Result<Vec<Word>> {
        fn unary_expression(this: &mut Generator, expr: &Expression, opcode: Opcode) -> Result<Vec<Word>> {
            let mut words = this.expression(expr)?;
            words.push(op(opcode));
            Ok(words)
        }
        fn binary_expression(
            this: &mut Generator,
            lhs: &Expression,
            rhs: &Expression,
            opcodes: &[Opcode],
        ) -> Result<Vec<Word>> {
            let mut words = this.expression(lhs)?;
            words.append(&mut this.expression(rhs)?);
            words.extend(opcodes.iter().map(|opcode| op(*opcode)));
            Ok(words)
        }
        match expr {
            Expression::Integer(_, n) => Ok(vec![op(Opcode::Const), int(*n)]),
            Expression::Var(col, name) => self.variable(col, name),
            Expression::Call(col, name, args) => self.call(col, name, args),
            Expression::Negation(_, e) => unary_expression(self, e, Opcode::Neg),
            Expression::Not(_, e) => unary_expression(self, e, Opcode::Not),
            Expression::Multiply(_, l, r) => binary_expression(self, l, r, &[Opcode::Mul]),
            Expression::Divide(_, l, r) => binary_expression(self, l, r, &[Opcode::Div]),
            Expression::Modulus(_, l, r) => binary_expression(self, l, r, &[Opcode::Mod]),
            Expression::Add(_, l, r) => binary_expression(self, l, r, &[Opcode::Add]),
            Expression::Subtract(_, l, r) => binary_expression(self, l, r, &[Opcode::Sub]),
            Expression::Equal(_, l, r) => binary_expression(self, l, r, &[Opcode::Eq]),
            Expression::NotEqual(_, l, r) => {
                binary_expression(self, l, r, &[Opcode::Eq, Opcode::Not])
            }
            Expression::Less(_, l, r) => binary_expression(self, l, r, &[Opcode::Lt]),
            Expression::LessEqual(_, l, r) => binary_expression(self, l, r, &[Opcode::Leq]),
            Expression::Greater(_, l, r) => binary_expression(self, l, r, &[Opcode::Gt]),
            Expression::GreaterEqual(_, l, r) => binary_expression(self, l, r, &[Opcode::Geq]),
            Expression::And(_, l, r) => binary_expression(self, l, r, &[Opcode::And]),
            Expression::Or(_, l, r) => binary_expression(self, l, r, &[Opcode::Or]),
        }
    }

    fn variable(&mut self, col: &Column, name: &Ident) -> Result<Vec<Word>> {
        let (slot, opcode) = match self.var.resolve(name) {
            Some(Slot::Local(slot)) => (i32::try_from(slot).ok(), Opcode::Load),
            Some(Slot::Global(index)) => (i32::try_from(index).ok(), Opcode::Gload),
            None => return Err(error!(UndefinedVariable, ..col; name)),
        };
        match slot {
            Some(slot) => Ok(vec![op(Opcode::Const), int(slot), op(opcode)]),
            None => Err(error!(Overflow, ..col; name)),
        }
    }

    fn call(&mut self, col: &Column, name: &Ident, args: &[Expression]) -> Result<Vec<Word>> {
        let (symbol, arity, locals) = match self.functions.get(name) {
            Some(function) => (function.symbol(), function.arity(), function.locals()),
            None => return Err(error!(UndefinedFunction, ..col; name)),
        };
        if arity != args.len() {
            let message = format!("{} EXPECTS {} ARGUMENTS", name, arity);
            return Err(error!(SyntaxError, ..col; &message));
        }
        let mut words = vec![];
        for arg in args.iter().rev() {
            words.append(&mut self.expression(arg)?);
        }
        let (arity, locals) = match (i32::try_from(arity), i32::try_from(locals)) {
            (Ok(arity), Ok(locals)) => (arity, locals),
            _ => return Err(error!(Overflow, ..col; name)),
        };
        words.extend_from_slice(&[op(Opcode::Call), Word::Symbol(symbol), int(arity), int(locals)]);
        Ok(words)
    }
}
