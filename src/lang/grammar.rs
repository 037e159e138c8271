use super::token::TokenKind;

/// ## Grammar rule identifiers
///
/// Ordered from the root (`code_block`) down the precedence ladder to the
/// terminal rules.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    CodeBlock,
    If,
    Else,
    While,
    For,
    Function,
    Lines,
    Line,
    Print,
    Assign,
    ArgsDec,
    Args,
    Ret,
    Or,
    And,
    Equality,
    Comparison,
    Sum,
    Product,
    Unary,
    Item,
    FuncCall,
    Const,
    Ref,
}

impl RuleId {
    pub const ALL: [RuleId; 24] = [
        RuleId::CodeBlock,
        RuleId::If,
        RuleId::Else,
        RuleId::While,
        RuleId::For,
        RuleId::Function,
        RuleId::Lines,
        RuleId::Line,
        RuleId::Print,
        RuleId::Assign,
        RuleId::ArgsDec,
        RuleId::Args,
        RuleId::Ret,
        RuleId::Or,
        RuleId::And,
        RuleId::Equality,
        RuleId::Comparison,
        RuleId::Sum,
        RuleId::Product,
        RuleId::Unary,
        RuleId::Item,
        RuleId::FuncCall,
        RuleId::Const,
        RuleId::Ref,
    ];

    pub fn name(self) -> &'static str {
        use RuleId::*;
        match self {
            CodeBlock => "code_block",
            If => "if",
            Else => "else",
            While => "while",
            For => "for",
            Function => "function",
            Lines => "lines",
            Line => "line",
            Print => "print",
            Assign => "assign",
            ArgsDec => "args_dec",
            Args => "args",
            Ret => "ret",
            Or => "or",
            And => "and",
            Equality => "equality",
            Comparison => "comparison",
            Sum => "sum",
            Product => "product",
            Unary => "unary",
            Item => "item",
            FuncCall => "func_call",
            Const => "const",
            Ref => "ref",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One position of a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Literal(TokenKind),
    RuleRef(RuleId),
    OneOf(&'static [TokenKind]),
}

impl Element {
    /// True if a single token of `kind` satisfies this element.
    /// Rule references never accept a token directly.
    pub fn accepts(&self, kind: TokenKind) -> bool {
        match self {
            Element::Literal(k) => *k == kind,
            Element::OneOf(kinds) => kinds.contains(&kind),
            Element::RuleRef(_) => false,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Element::Literal(kind) => write!(f, "{}", kind),
            Element::RuleRef(id) => write!(f, "${}", id),
            Element::OneOf(kinds) => {
                let kinds: Vec<&str> = kinds.iter().map(|k| k.tag()).collect();
                write!(f, "({})", kinds.join(" | "))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    id: RuleId,
    patterns: Vec<Vec<Element>>,
    terminal: bool,
    operator: Option<usize>,
}

impl Rule {
    fn new(id: RuleId, patterns: Vec<Vec<Element>>) -> Rule {
        Rule {
            id,
            patterns,
            terminal: false,
            operator: None,
        }
    }

    fn terminal(id: RuleId, kind: TokenKind) -> Rule {
        Rule {
            id,
            patterns: vec![vec![Element::Literal(kind)]],
            terminal: true,
            operator: None,
        }
    }

    fn with_operator(self, index: usize) -> Rule {
        Rule {
            operator: Some(index),
            ..self
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn patterns(&self) -> &[Vec<Element>] {
        &self.patterns
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Pattern index whose matched token becomes the node's operator.
    pub fn operator(&self) -> Option<usize> {
        self.operator
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let patterns: Vec<String> = self
            .patterns
            .iter()
            .map(|pattern| {
                if pattern.is_empty() {
                    "<empty>".to_string()
                } else {
                    let elements: Vec<String> = pattern.iter().map(|e| e.to_string()).collect();
                    elements.join(" ")
                }
            })
            .collect();
        write!(f, "{} := {}", self.name(), patterns.join(" | "))
    }
}

/// ## Declarative grammar table
///
/// Alternatives are listed in the order they are tried. Within a
/// pattern, two rule references are never adjacent: every reference
/// is bounded by the literal that follows it or by the end of the slice.

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Default for Grammar {
    fn default() -> Grammar {
        Grammar::new()
    }
}

impl Grammar {
    pub fn new() -> Grammar {
        use Element::{Literal as T, OneOf, RuleRef as R};
        use RuleId::*;
        use TokenKind as K;

        let block = || -> Vec<Element> {
            vec![
                T(K::OpenParen),
                R(Or),
                T(K::CloseParen),
                T(K::OpenBrace),
                R(CodeBlock),
                T(K::CloseBrace),
            ]
        };
        let then = |mut head: Vec<Element>, tail: Element| {
            head.push(tail);
            head
        };
        let for_head = vec![
            T(K::OpenParen),
            R(Assign),
            T(K::Semi),
            R(Or),
            T(K::Semi),
            R(Assign),
            T(K::CloseParen),
            T(K::OpenBrace),
            R(CodeBlock),
            T(K::CloseBrace),
        ];
        let function_head = vec![
            T(K::Ref),
            T(K::OpenParen),
            R(ArgsDec),
            T(K::OpenBrace),
            R(CodeBlock),
            T(K::CloseBrace),
        ];
        let else_head = vec![T(K::Else), T(K::OpenBrace), R(CodeBlock), T(K::CloseBrace)];

        let mut rules = vec![
            Rule::new(
                CodeBlock,
                vec![
                    vec![T(K::FuncDec), R(Function)],
                    vec![T(K::While), R(While)],
                    vec![T(K::For), R(For)],
                    vec![T(K::If), R(If)],
                    vec![R(Lines)],
                    vec![],
                ],
            ),
            Rule::new(
                If,
                vec![
                    then(block(), R(Else)),
                    then(block(), R(CodeBlock)),
                    block(),
                ],
            ),
            Rule::new(
                Else,
                vec![then(else_head.clone(), R(CodeBlock)), else_head],
            ),
            Rule::new(While, vec![then(block(), R(CodeBlock)), block()]),
            Rule::new(For, vec![then(for_head.clone(), R(CodeBlock)), for_head]),
            Rule::new(
                Function,
                vec![then(function_head.clone(), R(CodeBlock)), function_head],
            )
            .with_operator(0),
            Rule::new(
                Lines,
                vec![
                    vec![R(Line), T(K::Semi)],
                    vec![R(Line), T(K::Semi), R(CodeBlock)],
                ],
            ),
            Rule::new(
                Line,
                vec![vec![R(Assign)], vec![R(Print)], vec![R(Ret)], vec![R(Or)]],
            ),
            Rule::new(
                Print,
                vec![vec![T(K::Print), T(K::OpenParen), R(Or), T(K::CloseParen)]],
            ),
            Rule::new(
                Assign,
                vec![
                    vec![R(Ref), T(K::Assign), R(Or)],
                    vec![T(K::VarDec), R(Ref), T(K::Assign), R(Or)],
                ],
            ),
            Rule::new(
                ArgsDec,
                vec![
                    vec![R(Ref), T(K::Comma), R(ArgsDec)],
                    vec![R(Ref), T(K::CloseParen)],
                    vec![T(K::CloseParen)],
                    vec![],
                ],
            ),
            Rule::new(
                Args,
                vec![vec![R(Or), T(K::Comma), R(Args)], vec![R(Or)], vec![]],
            ),
            Rule::new(Ret, vec![vec![T(K::Ret), R(Or)], vec![T(K::Ret)]]),
            Rule::new(Or, vec![vec![R(And), T(K::Or), R(Or)], vec![R(And)]]).with_operator(1),
            Rule::new(
                And,
                vec![vec![R(Equality), T(K::And), R(And)], vec![R(Equality)]],
            )
            .with_operator(1),
            Rule::new(
                Equality,
                vec![
                    vec![R(Comparison), OneOf(&[K::Eq, K::Neq]), R(Equality)],
                    vec![R(Comparison)],
                ],
            )
            .with_operator(1),
            Rule::new(
                Comparison,
                vec![
                    vec![R(Sum), OneOf(&[K::Gt, K::Geq, K::Lt, K::Leq]), R(Comparison)],
                    vec![R(Sum)],
                ],
            )
            .with_operator(1),
            Rule::new(
                Sum,
                vec![
                    vec![R(Product), OneOf(&[K::Sub, K::Add]), R(Sum)],
                    vec![R(Product)],
                ],
            )
            .with_operator(1),
            Rule::new(
                Product,
                vec![
                    vec![R(Unary), OneOf(&[K::Mul, K::Div, K::Mod]), R(Product)],
                    vec![R(Unary)],
                ],
            )
            .with_operator(1),
            Rule::new(
                Unary,
                vec![vec![OneOf(&[K::Sub, K::Not]), R(Unary)], vec![R(Item)]],
            )
            .with_operator(0),
            Rule::new(
                Item,
                vec![
                    vec![R(FuncCall)],
                    vec![T(K::OpenParen), R(Or), T(K::CloseParen)],
                    vec![R(Const)],
                    vec![R(Ref)],
                ],
            ),
            Rule::new(
                FuncCall,
                vec![vec![T(K::Ref), T(K::OpenParen), R(Args), T(K::CloseParen)]],
            )
            .with_operator(0),
            Rule::terminal(Const, K::Const),
            Rule::terminal(Ref, K::Ref),
        ];
        rules.sort_by_key(|rule| rule.id());
        Grammar { rules }
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id as usize]
    }

    pub fn root(&self) -> &Rule {
        self.rule(RuleId::CodeBlock)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_id() {
        let grammar = Grammar::new();
        assert_eq!(grammar.rules().len(), RuleId::ALL.len());
        for id in RuleId::ALL.iter() {
            assert_eq!(grammar.rule(*id).id(), *id);
        }
    }

    #[test]
    fn test_rule_references_are_bounded() {
        let grammar = Grammar::new();
        for rule in grammar.rules() {
            for pattern in rule.patterns() {
                for pair in pattern.windows(2) {
                    let adjacent = matches!(pair, [Element::RuleRef(_), Element::RuleRef(_)]);
                    assert!(!adjacent, "{}", rule);
                }
            }
        }
    }

    #[test]
    fn test_display() {
        let grammar = Grammar::new();
        assert_eq!(
            grammar.rule(RuleId::Sum).to_string(),
            "sum := $product (SUB | ADD) $sum | $product"
        );
        assert_eq!(
            grammar.rule(RuleId::Args).to_string(),
            "args := $or COMMA $args | $or | <empty>"
        );
        assert!(grammar.rule(RuleId::Ref).is_terminal());
        assert_eq!(grammar.rule(RuleId::Function).operator(), Some(0));
    }
}
