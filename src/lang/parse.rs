use super::grammar::{Element, Grammar, Rule, RuleId};
use super::{ast::Statement, lower, token::Token, Column, Error};
use crate::error;
use std::collections::HashSet;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parses a token stream into the typed syntax tree.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>> {
    let grammar = Grammar::new();
    let tree = parse_tree(&grammar, tokens)?;
    lower::lower(&tree)
}

/// Matches the whole token stream against the grammar's root rule.
pub fn parse_tree<'g>(grammar: &'g Grammar, tokens: &[Token]) -> Result<Node<'g>> {
    let mut matcher = Matcher {
        grammar,
        tokens: tokens.into(),
        failures: HashSet::new(),
    };
    let root = grammar.root();
    match matcher.matches(root, 0..tokens.len()) {
        Some(node) => Ok(node),
        None => {
            let remaining: Vec<&str> = tokens.iter().map(Token::text).collect();
            Err(error!(SyntaxError, ..&(0..tokens.len());
                &format!("NO PATTERN OF {} MATCHES {}", root.name(), remaining.join(" "))))
        }
    }
}

/// ## Generic parse tree
///
/// A node covers a contiguous span of tokens. Terminal nodes have no children.
/// Statement lists nest one level per statement, so dropping and display
/// walk the tree with an explicit stack.

#[derive(Debug, Clone)]
pub struct Node<'g> {
    rule: &'g Rule,
    tokens: Rc<[Token]>,
    column: Column,
    children: Vec<Node<'g>>,
    operator: Option<Token>,
}

impl<'g> Node<'g> {
    pub fn rule(&self) -> &'g Rule {
        self.rule
    }

    pub fn id(&self) -> RuleId {
        self.rule.id()
    }

    /// Covered source tokens joined by single spaces.
    pub fn text(&self) -> String {
        let words: Vec<&str> = match self.tokens.get(self.column.clone()) {
            Some(tokens) => tokens.iter().map(Token::text).collect(),
            None => vec![],
        };
        words.join(" ")
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn children(&self) -> &[Node<'g>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node<'g>> {
        self.children.get(index)
    }

    pub fn operator(&self) -> Option<&Token> {
        self.operator.as_ref()
    }
}

impl<'g> Drop for Node<'g> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<'g> std::fmt::Display for Node<'g> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match &node.operator {
                Some(op) => writeln!(
                    f,
                    "{}{} [{}] {}",
                    indent,
                    node.rule.name(),
                    op.text(),
                    node.text()
                )?,
                None => writeln!(f, "{}{} {}", indent, node.rule.name(), node.text())?,
            }
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}

/// A pattern matched up to its trailing rule reference. It completes once
/// that reference has matched the rest of the span.
struct Pending<'g> {
    rule: &'g Rule,
    span: Column,
    alternative: usize,
    children: Vec<Node<'g>>,
    operator: Option<Token>,
    delegate: bool,
}

enum Step<'g> {
    Matched(Node<'g>),
    Tail(Pending<'g>, &'g Rule, Column),
    Failed,
}

struct Matcher<'g> {
    grammar: &'g Grammar,
    tokens: Rc<[Token]>,
    failures: HashSet<(RuleId, usize, usize)>,
}

impl<'g> Matcher<'g> {
    /// First matching alternative of `rule` covering exactly `span`.
    ///
    /// Trailing rule references are followed in a loop so statement lists
    /// and operator chains do not grow the native stack. When a tail fails,
    /// the pattern that led to it resumes at its next alternative.
    fn matches(&mut self, rule: &'g Rule, span: Column) -> Option<Node<'g>> {
        let mut pending: Vec<Pending<'g>> = vec![];
        let (mut rule, mut span, mut first) = (rule, span, 0);
        loop {
            let mut step = self.attempt(rule, span.clone(), first);
            loop {
                match step {
                    Step::Tail(parent, sub, sub_span) => {
                        pending.push(parent);
                        rule = sub;
                        span = sub_span;
                        first = 0;
                        break;
                    }
                    Step::Matched(node) => match pending.pop() {
                        None => return Some(node),
                        Some(parent) => step = Step::Matched(self.complete(parent, node)),
                    },
                    Step::Failed => match pending.pop() {
                        None => return None,
                        Some(parent) => {
                            rule = parent.rule;
                            span = parent.span;
                            first = parent.alternative + 1;
                            break;
                        }
                    },
                }
            }
        }
    }

    fn attempt(&mut self, rule: &'g Rule, span: Column, first: usize) -> Step<'g> {
        if rule.is_terminal() {
            return match self.terminal(rule, span) {
                Some(node) => Step::Matched(node),
                None => Step::Failed,
            };
        }
        let key = (rule.id(), span.start, span.end);
        if first == 0 && self.failures.contains(&key) {
            return Step::Failed;
        }
        for (alternative, pattern) in rule.patterns().iter().enumerate().skip(first) {
            match self.alternative(rule, alternative, pattern, span.clone()) {
                Step::Failed => continue,
                step => return step,
            }
        }
        self.failures.insert(key);
        Step::Failed
    }

    fn complete(&self, parent: Pending<'g>, node: Node<'g>) -> Node<'g> {
        if parent.delegate {
            return node;
        }
        let mut children = parent.children;
        children.push(node);
        self.node(parent.rule, parent.span, children, parent.operator)
    }

    fn terminal(&self, rule: &'g Rule, span: Column) -> Option<Node<'g>> {
        let element = rule.patterns().first()?.first()?;
        match self.tokens.get(span.clone()) {
            Some([token]) if element.accepts(token.kind()) => {
                Some(self.node(rule, span, vec![], None))
            }
            _ => None,
        }
    }

    fn alternative(
        &mut self,
        rule: &'g Rule,
        alternative: usize,
        pattern: &'g [Element],
        span: Column,
    ) -> Step<'g> {
        match pattern {
            [] if span.is_empty() => Step::Matched(self.node(rule, span, vec![], None)),
            [] => Step::Failed,
            [Element::RuleRef(id)] => {
                let parent = Pending {
                    rule,
                    span: span.clone(),
                    alternative,
                    children: vec![],
                    operator: None,
                    delegate: true,
                };
                Step::Tail(parent, self.grammar.rule(*id), span)
            }
            _ => self
                .scan(rule, alternative, pattern, span)
                .unwrap_or(Step::Failed),
        }
    }

    fn scan(
        &mut self,
        rule: &'g Rule,
        alternative: usize,
        pattern: &'g [Element],
        span: Column,
    ) -> Option<Step<'g>> {
        let grammar = self.grammar;
        let tokens = Rc::clone(&self.tokens);
        let mut cursor = 0;
        let mut index = span.start;
        let mut children = vec![];
        let mut operator = None;
        while index < span.end {
            let element = pattern.get(cursor)?;
            if let Element::RuleRef(id) = element {
                let sub = grammar.rule(*id);
                match bound(pattern, cursor) {
                    None if cursor + 1 == pattern.len() => {
                        let parent = Pending {
                            rule,
                            span: span.clone(),
                            alternative,
                            children,
                            operator,
                            delegate: false,
                        };
                        return Some(Step::Tail(parent, sub, index..span.end));
                    }
                    None => return None,
                    Some(next) => {
                        let stop = pattern[next];
                        let (end, child) = (index..span.end)
                            .filter(|end| stop.accepts(tokens[*end].kind()))
                            .find_map(|end| self.matches(sub, index..end).map(|n| (end, n)))?;
                        children.push(child);
                        if rule.operator() == Some(next) {
                            operator = Some(tokens[end].clone());
                        }
                        cursor = next + 1;
                        index = end + 1;
                    }
                }
            } else {
                let token = &tokens[index];
                if !element.accepts(token.kind()) {
                    return None;
                }
                if rule.operator() == Some(cursor) {
                    operator = Some(token.clone());
                }
                cursor += 1;
                index += 1;
            }
        }
        if cursor != pattern.len() {
            return None;
        }
        Some(Step::Matched(self.node(rule, span, children, operator)))
    }

    fn node(
        &self,
        rule: &'g Rule,
        span: Column,
        children: Vec<Node<'g>>,
        operator: Option<Token>,
    ) -> Node<'g> {
        Node {
            rule,
            tokens: Rc::clone(&self.tokens),
            column: span,
            children,
            operator,
        }
    }
}

/// Index of the first literal or alternation element after `cursor`.
fn bound(pattern: &[Element], cursor: usize) -> Option<usize> {
    pattern
        .iter()
        .enumerate()
        .skip(cursor + 1)
        .find(|(_, element)| !matches!(element, Element::RuleRef(_)))
        .map(|(index, _)| index)
}
