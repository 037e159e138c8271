use super::Column;
use crate::mach::Address;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    column: Column,
    address: Option<Address>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            column: 0..0,
            address: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn at_address(self, address: Address) -> Error {
        Error {
            address: Some(address),
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    LexicalError = 1,
    SyntaxError = 2,
    UndefinedVariable = 3,
    UndefinedFunction = 4,
    Overflow = 6,
    StackOverflow = 7,
    StackUnderflow = 8,
    InvalidAddress = 9,
    IllegalInstruction = 10,
    DivisionByZero = 11,
    UnknownMnemonic = 12,
    Break = 13,
    InternalError = 51,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        use ErrorCode::*;
        match self {
            LexicalError => "LEXICAL ERROR",
            SyntaxError => "SYNTAX ERROR",
            UndefinedVariable => "UNDEFINED VARIABLE",
            UndefinedFunction => "UNDEFINED FUNCTION",
            Overflow => "OVERFLOW",
            StackOverflow => "STACK OVERFLOW",
            StackUnderflow => "STACK UNDERFLOW",
            InvalidAddress => "INVALID ADDRESS",
            IllegalInstruction => "ILLEGAL INSTRUCTION",
            DivisionByZero => "DIVISION BY ZERO",
            UnknownMnemonic => "UNKNOWN MNEMONIC",
            Break => "BREAK",
            InternalError => "INTERNAL ERROR",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" IN {}..{}", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", self.code.as_str(), suffix)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(error!(DivisionByZero).to_string(), "DIVISION BY ZERO");
        assert_eq!(
            error!(UndefinedVariable, ..&(3..4); "x").to_string(),
            "UNDEFINED VARIABLE IN 3..4; x"
        );
        assert_eq!(
            error!(StackOverflow; "OPERAND STACK")
                .at_address(12)
                .to_string(),
            "STACK OVERFLOW AT 12; OPERAND STACK"
        );
    }
}
