// AST (Abstract Syntax Tree) definitions for the interpreter

use std::fmt;
use std::rc::Rc;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Operators accepted by a boolean-level expression (`or`, `and`, comparisons)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Or,
    And,
    Eq,
    Ne,
    Ge,
    Gt,
    Lt,
    Le,
}

impl BooleanOp {
    /// Ordering comparisons are only defined for numbers and strings.
    pub fn is_ordering(self) -> bool {
        matches!(self, BooleanOp::Ge | BooleanOp::Gt | BooleanOp::Lt | BooleanOp::Le)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BooleanOp::Or => "or",
            BooleanOp::And => "and",
            BooleanOp::Eq => "==",
            BooleanOp::Ne => "!=",
            BooleanOp::Ge => ">=",
            BooleanOp::Gt => ">",
            BooleanOp::Lt => "<",
            BooleanOp::Le => "<=",
        }
    }
}

/// `+` and `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOp {
    Add,
    Sub,
}

impl AdditiveOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AdditiveOp::Add => "+",
            AdditiveOp::Sub => "-",
        }
    }
}

/// `*` and `/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Mul,
    Div,
}

impl MultiplicativeOp {
    pub fn symbol(self) -> &'static str {
        match self {
            MultiplicativeOp::Mul => "*",
            MultiplicativeOp::Div => "/",
        }
    }
}

/// A call, valid both as an expression and as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

/// Expression nodes
///
/// A grammar level that parsed no operator collapses to its operand, so the
/// binary variants always carry both sides.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Boolean {
        left: Box<Expr>,
        op: BooleanOp,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Additive {
        left: Box<Expr>,
        op: AdditiveOp,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Multiplicative {
        left: Box<Expr>,
        op: MultiplicativeOp,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Not {
        inner: Box<Expr>,
        location: SourceLocation,
    },
    Call(Call),
    Identifier(String, SourceLocation),
    NumberLiteral(String, SourceLocation),
    StringLiteral(String, SourceLocation),
    BooleanLiteral(bool, SourceLocation),
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Boolean { location, .. }
            | Expr::Additive { location, .. }
            | Expr::Multiplicative { location, .. }
            | Expr::Not { location, .. } => *location,
            Expr::Call(call) => call.location,
            Expr::Identifier(_, loc)
            | Expr::NumberLiteral(_, loc)
            | Expr::StringLiteral(_, loc)
            | Expr::BooleanLiteral(_, loc) => *loc,
        }
    }
}

/// A function definition. Shared with the interpreter's function table once
/// its defining statement has executed.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub location: SourceLocation,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration {
        name: String,
        init: Expr,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    FunctionDef(Rc<FunctionDef>),
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Expression(Call),
}

/// An ordered list of statements; the whole program is one `Block`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub location: SourceLocation,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, location: SourceLocation) -> Self {
        Self {
            statements,
            location,
        }
    }
}

// ===== Parenthesised dump form =====

/// Writes `items` space-joined, or `nil` when there are none.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return write!(f, "nil");
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(block ")?;
        write_list(f, &self.statements)?;
        write!(f, ")")
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(call {} ", self.name)?;
        write_list(f, &self.args)?;
        write!(f, ")")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Declaration { name, init, .. } => write!(f, "(declaration {} {})", name, init),
            Stmt::Assignment { name, value, .. } => write!(f, "(assignment {} {})", name, value),
            Stmt::If {
                condition, body, ..
            } => write!(f, "(if {} {})", condition, body),
            Stmt::While {
                condition, body, ..
            } => write!(f, "(while {} {})", condition, body),
            Stmt::Break { .. } => write!(f, "(break)"),
            Stmt::Continue { .. } => write!(f, "(continue)"),
            Stmt::FunctionDef(def) => {
                write!(f, "(function {} ", def.name)?;
                write_list(f, &def.params)?;
                write!(f, " {})", def.body)
            }
            Stmt::Return { value: Some(v), .. } => write!(f, "(return {})", v),
            Stmt::Return { value: None, .. } => write!(f, "(return nil)"),
            Stmt::Expression(call) => write!(f, "{}", call),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Boolean {
                left, op, right, ..
            } => write!(f, "(boolean {} {} {})", left, op.symbol(), right),
            Expr::Additive {
                left, op, right, ..
            } => write!(f, "(additive {} {} {})", left, op.symbol(), right),
            Expr::Multiplicative {
                left, op, right, ..
            } => write!(f, "(multiplicative {} {} {})", left, op.symbol(), right),
            Expr::Not { inner, .. } => write!(f, "(not {})", inner),
            Expr::Call(call) => write!(f, "{}", call),
            Expr::Identifier(name, _) => write!(f, "(identifier {})", name),
            Expr::NumberLiteral(text, _) => write!(f, "(number {})", text),
            Expr::StringLiteral(text, _) => write!(f, "(string \"{}\")", text),
            Expr::BooleanLiteral(b, _) => write!(f, "(bool {})", b),
        }
    }
}
