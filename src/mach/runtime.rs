use super::{Address, Opcode, Program, Stack};
use crate::error;
use crate::lang::Error;
use log::{log_enabled, trace, Level};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

pub const STACK_CAPACITY: usize = 1024;
pub const GLOBAL_CAPACITY: usize = 300;

/// Memory limits of a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub stack_capacity: usize,
    pub global_capacity: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            stack_capacity: STACK_CAPACITY,
            global_capacity: GLOBAL_CAPACITY,
        }
    }
}

/// Reported by `Runtime::execute` after each slice of work.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Errors(Vec<Error>),
    Print(String),
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    args: usize,
    locals: usize,
}

/// ## Virtual machine
///
/// Registers `pc` and `fp` index program memory and the operand stack.
/// `sp` is the index of the top of the stack, -1 when empty.
///
/// A call frame, from the bottom up: arguments (last pushed is the first
/// parameter), argument count, return address, saved `fp`, then the
/// zeroed locals. `fp` points at the saved `fp`, so parameter `-n` is at
/// `fp - n - 2` and local `n` is at `fp + n + 1`.

pub struct Runtime {
    program: Program,
    config: Config,
    stack: Stack<i32>,
    globals: Vec<i32>,
    frames: Vec<Frame>,
    pc: Address,
    fp: usize,
    halted: bool,
    interrupted: bool,
    fault: Option<Error>,
    print_buffer: String,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Program::halt())
    }
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime::with_config(program, Config::default())
    }

    pub fn with_config(program: Program, config: Config) -> Runtime {
        Runtime {
            program,
            config,
            stack: Stack::new(config.stack_capacity, "OPERAND STACK"),
            globals: vec![0; config.global_capacity],
            frames: vec![],
            pc: 0,
            fp: 0,
            halted: false,
            interrupted: false,
            fault: None,
            print_buffer: String::new(),
        }
    }

    /// Replaces the program and resets registers and memory.
    pub fn load(&mut self, program: Program) {
        *self = Runtime::with_config(program, self.config);
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn fp(&self) -> usize {
        self.fp
    }

    pub fn sp(&self) -> isize {
        self.stack.len() as isize - 1
    }

    pub fn stack(&self) -> &[i32] {
        self.stack.as_slice()
    }

    pub fn globals(&self) -> &[i32] {
        &self.globals
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Stops a running program at the next `execute`.
    pub fn interrupt(&mut self) {
        if !self.halted {
            self.interrupted = true;
        }
    }

    /// Runs at most `cycles` instructions. Output is reported before the
    /// fault that followed it.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(event) = self.pending() {
            return event;
        }
        if self.halted {
            return Event::Stopped;
        }
        if self.interrupted {
            self.interrupted = false;
            self.halted = true;
            return Event::Errors(vec![error!(Break).at_address(self.pc)]);
        }
        for _ in 0..cycles {
            if let Err(error) = self.step() {
                self.halted = true;
                self.fault = Some(error.at_address(self.pc));
                break;
            }
            if self.halted {
                break;
            }
        }
        match self.pending() {
            Some(event) => event,
            None if self.halted => Event::Stopped,
            None => Event::Running,
        }
    }

    /// Runs to completion and returns everything printed.
    pub fn run(&mut self) -> Result<String> {
        let mut output = String::new();
        loop {
            match self.execute(usize::max_value()) {
                Event::Print(s) => output.push_str(&s),
                Event::Errors(mut errors) => {
                    if !errors.is_empty() {
                        return Err(errors.remove(0));
                    }
                }
                Event::Running => {}
                Event::Stopped => return Ok(output),
            }
        }
    }

    fn pending(&mut self) -> Option<Event> {
        if !self.print_buffer.is_empty() {
            return Some(Event::Print(std::mem::take(&mut self.print_buffer)));
        }
        self.fault.take().map(|error| Event::Errors(vec![error]))
    }

    fn step(&mut self) -> Result<()> {
        let word = match self.program.get(self.pc) {
            Some(word) => word,
            None => return Err(error!(InvalidAddress; "PROGRAM COUNTER OUT OF RANGE")),
        };
        let opcode = Opcode::try_from(word)?;
        let mut next = self.pc + 1 + opcode.operands();
        match opcode {
            Opcode::Add => self.binary(|a, b| a.checked_add(b).ok_or_else(|| error!(Overflow)))?,
            Opcode::Sub => self.binary(|a, b| a.checked_sub(b).ok_or_else(|| error!(Overflow)))?,
            Opcode::Mul => self.binary(|a, b| a.checked_mul(b).ok_or_else(|| error!(Overflow)))?,
            Opcode::Div => self.binary(|a, b| match a.checked_div(b) {
                Some(n) => Ok(n),
                None if b == 0 => Err(error!(DivisionByZero)),
                None => Err(error!(Overflow)),
            })?,
            Opcode::Mod => self.binary(|a, b| match a.checked_rem(b) {
                Some(n) => Ok(n),
                None if b == 0 => Err(error!(DivisionByZero)),
                None => Err(error!(Overflow)),
            })?,
            Opcode::Lt => self.binary(|a, b| Ok(i32::from(a < b)))?,
            Opcode::Gt => self.binary(|a, b| Ok(i32::from(a > b)))?,
            Opcode::Leq => self.binary(|a, b| Ok(i32::from(a <= b)))?,
            Opcode::Geq => self.binary(|a, b| Ok(i32::from(a >= b)))?,
            Opcode::Eq => self.binary(|a, b| Ok(i32::from(a == b)))?,
            Opcode::And => self.binary(|a, b| Ok(i32::from(a == 1 && b == 1)))?,
            Opcode::Or => self.binary(|a, b| Ok(i32::from(a == 1 || b == 1)))?,
            Opcode::Not => {
                let a = self.stack.pop()?;
                self.stack.push(match a {
                    0 => 1,
                    1 => 0,
                    a => a,
                })?;
            }
            Opcode::Neg => {
                let a = self.stack.pop()?;
                self.stack.push(a.checked_neg().ok_or_else(|| error!(Overflow))?)?;
            }
            Opcode::Jmp => {
                let target = self.stack.pop()?;
                next = self.target(target)?;
            }
            Opcode::Jmpt | Opcode::Jmpf => {
                let target = self.stack.pop()?;
                let condition = self.stack.pop()?;
                let expected = if opcode == Opcode::Jmpt { 1 } else { 0 };
                if condition == expected {
                    next = self.target(target)?;
                }
            }
            Opcode::Const => {
                let value = self.operand(1)?;
                self.stack.push(value)?;
            }
            Opcode::Load => {
                let slot = self.stack.pop()?;
                let index = self.local(slot)?;
                let value = self.stack.get(index).copied();
                self.stack.push(value.ok_or_else(|| error!(InvalidAddress))?)?;
            }
            Opcode::Store => {
                let slot = self.operand(1)?;
                let value = self.stack.pop()?;
                let index = self.local(slot)?;
                match self.stack.get_mut(index) {
                    Some(cell) => *cell = value,
                    None => return Err(error!(InvalidAddress; "LOCAL SLOT OUT OF RANGE")),
                }
            }
            Opcode::Gload => {
                let index = self.stack.pop()?;
                let index = self.global(index)?;
                self.stack.push(self.globals[index])?;
            }
            Opcode::Gstore => {
                let index = self.operand(1)?;
                let value = self.stack.pop()?;
                let index = self.global(index)?;
                self.globals[index] = value;
            }
            Opcode::Print => {
                let value = self.stack.pop()?;
                self.print_buffer.push_str(&format!("{}\n", value));
            }
            Opcode::Pop => {
                self.stack.pop()?;
            }
            Opcode::Halt => {
                self.halted = true;
                next = self.pc;
            }
            Opcode::Call => {
                let target = self.operand(1)?;
                let args = self.count(self.operand(2)?)?;
                let locals = self.count(self.operand(3)?)?;
                if args > self.stack.len() {
                    return Err(error!(StackUnderflow; "MISSING ARGUMENTS"));
                }
                self.stack.push(self.operand(2)?)?;
                self.stack.push(self.word(next)?)?;
                self.stack.push(self.word(self.fp)?)?;
                self.fp = self.stack.len() - 1;
                for _ in 0..locals {
                    self.stack.push(0)?;
                }
                self.frames.push(Frame { args, locals });
                next = self.target(target)?;
            }
            Opcode::Ret => {
                let value = self.stack.pop()?;
                if self.frames.pop().is_none() {
                    return Err(error!(StackUnderflow; "RETURN WITHOUT CALL"));
                }
                self.stack.truncate(self.fp + 1);
                let fp = self.stack.pop()?;
                let ret = self.stack.pop()?;
                let args = self.stack.pop()?;
                self.fp = self.count(fp)?;
                next = self.target(ret)?;
                self.stack.drop_n(self.count(args)?)?;
                self.stack.push(value)?;
            }
        }
        if log_enabled!(Level::Trace) {
            trace!(
                "{:>5} {:<6} pc={} sp={} fp={} {:?}",
                self.pc,
                opcode.mnemonic(),
                next,
                self.sp(),
                self.fp,
                self.stack
            );
        }
        self.pc = next;
        Ok(())
    }

    fn binary<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(i32, i32) -> Result<i32>,
    {
        let (a, b) = self.stack.pop_2()?;
        self.stack.push(f(a, b)?)
    }

    fn operand(&self, offset: usize) -> Result<i32> {
        self.program
            .get(self.pc + offset)
            .ok_or_else(|| error!(InvalidAddress; "MISSING OPERAND"))
    }

    fn word(&self, n: usize) -> Result<i32> {
        i32::try_from(n).map_err(|_| error!(Overflow))
    }

    fn count(&self, n: i32) -> Result<usize> {
        usize::try_from(n).map_err(|_| error!(IllegalInstruction; "NEGATIVE COUNT"))
    }

    fn target(&self, addr: i32) -> Result<Address> {
        match usize::try_from(addr) {
            Ok(addr) if addr < self.program.len() => Ok(addr),
            _ => Err(error!(InvalidAddress; &format!("JUMP TO {}", addr))),
        }
    }

    fn global(&self, index: i32) -> Result<usize> {
        match usize::try_from(index) {
            Ok(index) if index < self.globals.len() => Ok(index),
            _ => Err(error!(InvalidAddress; &format!("GLOBAL {} OUT OF RANGE", index))),
        }
    }

    /// Stack index of a slot in the active frame. There are no slots
    /// outside a call.
    fn local(&self, slot: i32) -> Result<usize> {
        let in_frame = match self.frames.last() {
            Some(frame) if slot >= 0 => (slot as usize) < frame.locals,
            Some(frame) => (-(slot as i64)) as usize <= frame.args,
            None => false,
        };
        let offset = if slot >= 0 {
            self.fp as i64 + slot as i64 + 1
        } else {
            self.fp as i64 + slot as i64 - 2
        };
        match usize::try_from(offset) {
            Ok(index) if in_frame && index < self.stack.len() => Ok(index),
            _ => Err(error!(InvalidAddress; &format!("LOCAL SLOT {} OUT OF RANGE", slot))),
        }
    }
}
