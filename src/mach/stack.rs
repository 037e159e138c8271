use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    capacity: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(capacity: usize, overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            capacity,
            vec: vec![],
        }
    }
    fn overflow_error(&self) -> Error {
        error!(StackOverflow; self.overflow_message)
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }
    pub fn get(&self, index: usize) -> Option<&T> {
        self.vec.get(index)
    }
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.vec.get_mut(index)
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.capacity {
            return Err(self.overflow_error());
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    /// Discards the top `len` elements.
    pub fn drop_n(&mut self, len: usize) -> Result<()> {
        if len > self.vec.len() {
            Err(self.underflow_error())
        } else {
            self.vec.truncate(self.vec.len() - len);
            Ok(())
        }
    }
    pub fn truncate(&mut self, len: usize) {
        self.vec.truncate(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_capacity() {
        let mut stack: Stack<i32> = Stack::new(2, "TEST STACK");
        assert!(stack.push(1).is_ok());
        assert!(stack.push(2).is_ok());
        let err = stack.push(3).unwrap_err();
        assert_eq!(err.code(), ErrorCode::StackOverflow);
        assert_eq!(err.to_string(), "STACK OVERFLOW; TEST STACK");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_pop() {
        let mut stack: Stack<i32> = Stack::new(8, "TEST STACK");
        for n in 1..=4 {
            stack.push(n).unwrap();
        }
        assert_eq!(stack.pop_2(), Ok((3, 4)));
        stack.drop_n(1).unwrap();
        assert_eq!(stack.pop(), Ok(1));
        assert_eq!(stack.pop().unwrap_err().code(), ErrorCode::StackUnderflow);
        assert!(stack.drop_n(1).is_err());
    }
}
