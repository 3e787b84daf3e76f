use std::fmt;

use serde::{Deserialize, Serialize};

use super::pattern::TerminalPattern;

/// One node of a grammar rule's definition tree.
///
/// The set of variants is closed: every traversal in the workspace matches
/// on all six kinds without a wildcard arm, so adding a kind is a
/// compile-time break for every consumer.
///
/// The structured-data form is internally tagged by `kind`:
///
/// ```json
/// { "kind": "Sequence", "elements": [
///     { "kind": "Terminal", "name": "LBrace", "pattern": "{" },
///     { "kind": "List", "element": { "kind": "NonTerminal", "name": "Field" } }
/// ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GrammarElement {
    /// A lexical symbol, optionally carrying a literal or regex matcher.
    Terminal {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<TerminalPattern>,
    },
    /// A reference to another rule by name.
    NonTerminal { name: String },
    /// Ordered conjunction.
    Sequence { elements: Vec<GrammarElement> },
    /// Ordered alternation; consumers assume first-match semantics.
    OneOf { options: Vec<GrammarElement> },
    /// Zero or one occurrence.
    Optional { element: Box<GrammarElement> },
    /// One or more occurrences.
    List { element: Box<GrammarElement> },
}

/// The discriminant of a [`GrammarElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Terminal,
    NonTerminal,
    Sequence,
    OneOf,
    Optional,
    List,
}

impl ElementKind {
    /// The discriminant string used in the structured-data form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::NonTerminal => "NonTerminal",
            Self::Sequence => "Sequence",
            Self::OneOf => "OneOf",
            Self::Optional => "Optional",
            Self::List => "List",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GrammarElement {
    // -- Builders --

    /// A terminal without a pattern.
    pub fn terminal(name: impl Into<String>) -> Self {
        Self::Terminal {
            name: name.into(),
            pattern: None,
        }
    }

    /// A terminal carrying a pattern.
    pub fn terminal_with_pattern(name: impl Into<String>, pattern: TerminalPattern) -> Self {
        Self::Terminal {
            name: name.into(),
            pattern: Some(pattern),
        }
    }

    /// A punctuator or keyword whose name is also its literal text.
    pub fn token(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::Terminal {
            pattern: Some(TerminalPattern::Literal(text.clone())),
            name: text,
        }
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Self::NonTerminal { name: name.into() }
    }

    pub fn sequence(elements: Vec<GrammarElement>) -> Self {
        Self::Sequence { elements }
    }

    pub fn one_of(options: Vec<GrammarElement>) -> Self {
        Self::OneOf { options }
    }

    pub fn optional(element: GrammarElement) -> Self {
        Self::Optional {
            element: Box::new(element),
        }
    }

    pub fn list(element: GrammarElement) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    // -- Inspection --

    /// Returns the kind of this node.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Terminal { .. } => ElementKind::Terminal,
            Self::NonTerminal { .. } => ElementKind::NonTerminal,
            Self::Sequence { .. } => ElementKind::Sequence,
            Self::OneOf { .. } => ElementKind::OneOf,
            Self::Optional { .. } => ElementKind::Optional,
            Self::List { .. } => ElementKind::List,
        }
    }

    /// Direct children of this node, in order.
    pub fn children(&self) -> &[GrammarElement] {
        match self {
            Self::Terminal { .. } | Self::NonTerminal { .. } => &[],
            Self::Sequence { elements } => elements,
            Self::OneOf { options } => options,
            Self::Optional { element } | Self::List { element } => {
                std::slice::from_ref(element.as_ref())
            }
        }
    }

    /// The referenced rule name, if this node is a `NonTerminal`.
    pub fn as_non_terminal(&self) -> Option<&str> {
        match self {
            Self::NonTerminal { name } => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is a `NonTerminal` referencing `rule`.
    pub fn references(&self, rule: &str) -> bool {
        self.as_non_terminal() == Some(rule)
    }

    /// Returns true if this is a terminal whose name or literal pattern equals `text`.
    pub fn is_token(&self, text: &str) -> bool {
        match self {
            Self::Terminal { name, pattern } => {
                name == text
                    || pattern
                        .as_ref()
                        .and_then(TerminalPattern::as_literal)
                        .is_some_and(|lit| lit == text)
            }
            _ => false,
        }
    }

    /// Visits this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a GrammarElement)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Every rule name referenced by a `NonTerminal` in this tree, in
    /// pre-order, duplicates included.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Some(name) = node.as_non_terminal() {
                names.push(name);
            }
        });
        names
    }

    /// Total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    // -- Rewriting --

    /// Builds a new tree by rewriting children first, then passing the
    /// rebuilt node to `f`.
    ///
    /// The result never shares structure with `self`: every node is freshly
    /// allocated before `f` sees it, so `f` is free to take it apart.
    pub fn rewrite_bottom_up<F>(&self, f: &mut F) -> GrammarElement
    where
        F: FnMut(GrammarElement) -> GrammarElement,
    {
        let rebuilt = match self {
            Self::Terminal { name, pattern } => Self::Terminal {
                name: name.clone(),
                pattern: pattern.clone(),
            },
            Self::NonTerminal { name } => Self::NonTerminal { name: name.clone() },
            Self::Sequence { elements } => Self::Sequence {
                elements: elements.iter().map(|e| e.rewrite_bottom_up(f)).collect(),
            },
            Self::OneOf { options } => Self::OneOf {
                options: options.iter().map(|o| o.rewrite_bottom_up(f)).collect(),
            },
            Self::Optional { element } => Self::Optional {
                element: Box::new(element.rewrite_bottom_up(f)),
            },
            Self::List { element } => Self::List {
                element: Box::new(element.rewrite_bottom_up(f)),
            },
        };
        f(rebuilt)
    }

    /// Writes this node as an operand of a postfix operator or a larger
    /// composite, parenthesizing composites.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence { elements } if elements.len() > 1 => write!(f, "({self})"),
            Self::OneOf { options } if options.len() > 1 => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

/// EBNF-like notation: `"lit"` for literal terminals, `/re/` for regex
/// terminals, `<Name>` for pattern-less terminals, `?` and `+` postfix
/// operators, `|` for alternation.
impl fmt::Display for GrammarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal { name, pattern } => match pattern {
                Some(pattern) => write!(f, "{pattern}"),
                None => write!(f, "<{name}>"),
            },
            Self::NonTerminal { name } => write!(f, "{name}"),
            Self::Sequence { elements } => {
                if elements.is_empty() {
                    return write!(f, "()");
                }
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match element {
                        Self::OneOf { options } if options.len() > 1 => {
                            write!(f, "({element})")?
                        }
                        _ => write!(f, "{element}")?,
                    }
                }
                Ok(())
            }
            Self::OneOf { options } => {
                if options.is_empty() {
                    return write!(f, "()");
                }
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{option}")?;
                }
                Ok(())
            }
            Self::Optional { element } => {
                element.fmt_operand(f)?;
                write!(f, "?")
            }
            Self::List { element } => {
                element.fmt_operand(f)?;
                write!(f, "+")
            }
        }
    }
}
