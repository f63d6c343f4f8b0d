//! Event script expressions.
//!
//! Scripts test game state with small integer expressions, such as "the
//! party has at least 100 gold and the third key item". An expression is a
//! tree of [`Expr`] nodes with three interchangeable representations:
//! - the tree itself, which is evaluated against a [`Context`];
//! - a compact byte serialization, as stored in script files;
//! - a prefix-notation text form, which [`Expr`] displays as and parses
//!   from:
//! ```text
//! AND >= gold 100 hasItem 3
//! ```
//!
//! [`Expr`]: enum.Expr.html
//! [`Context`]: trait.Context.html

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;

mod expr;
mod parse;

pub use expr::BinaryOp;
pub use expr::Expr;
pub use expr::UnaryOp;
pub use parse::parse;

/// Game state that expressions read from.
pub trait Context {
  /// Returns the value of the variable `name`.
  fn var(&self, name: &str) -> i32;

  /// Returns whether the party holds item `item`.
  fn has_item(&self, item: i32) -> bool {
    let _ = item;
    false
  }

  /// Returns whether the party holds at least `amount` gold.
  fn has_gold(&self, amount: i32) -> bool {
    let _ = amount;
    false
  }
}

/// A [`Context`] in which every variable is zero.
///
/// [`Context`]: trait.Context.html
#[derive(Copy, Clone, Debug, Default)]
pub struct NoVars;

impl Context for NoVars {
  fn var(&self, _: &str) -> i32 {
    0
  }
}

/// Variables from a map; missing ones are zero.
impl Context for HashMap<String, i32> {
  fn var(&self, name: &str) -> i32 {
    self.get(name).copied().unwrap_or(0)
  }
}

/// An error from parsing, decoding or evaluating an expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
  /// The text form could not be parsed.
  Syntax {
    /// The byte position of the problem.
    pos: usize,
    /// What went wrong.
    message: String,
  },
  /// A serialized node began with an unknown type tag.
  UnknownTag(u8),
  /// A serialized node named an unknown operator.
  UnknownOperator(u8),
  /// A serialized expression ended early.
  Truncated,
  /// A serialized expression nested deeper than [`Expr::MAX_DEPTH`].
  ///
  /// [`Expr::MAX_DEPTH`]: enum.Expr.html#associatedconstant.MAX_DEPTH
  TooDeep,
  /// A serialized expression was followed by this many stray bytes.
  TrailingBytes(usize),
  /// A division or remainder by zero.
  DivideByZero,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Error::Syntax { pos, message } => {
        write!(f, "bad expression at column {}: {}", pos + 1, message)
      }
      Error::UnknownTag(t) => {
        write!(f, "invalid expression opcode: {:#04x}", t)
      }
      Error::UnknownOperator(op) => {
        write!(f, "invalid operator: {:?}", *op as char)
      }
      Error::Truncated => f.write_str("expression ends early"),
      Error::TooDeep => f.write_str("expression is nested too deeply"),
      Error::TrailingBytes(n) => {
        write!(f, "{} stray bytes after expression", n)
      }
      Error::DivideByZero => f.write_str("division by zero"),
    }
  }
}

impl StdError for Error {}
