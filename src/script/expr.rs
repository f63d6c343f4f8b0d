//! The expression tree, its evaluator and its byte serialization.
//!
//! Serialized nodes start with a type tag:
//! ```text
//! 00 vv vv vv vv    literal, little-endian i32
//! 01 name.. 00      variable, NUL-terminated
//! 02 op lhs rhs     binary operator
//! 03 op operand     unary operator
//! ```

use std::fmt;
use std::io;
use std::io::Read;
use std::io::Write;

use crate::script::Context;
use crate::script::Error;

const TAG_LITERAL: u8 = 0;
const TAG_VAR: u8 = 1;
const TAG_BINARY: u8 = 2;
const TAG_UNARY: u8 = 3;

macro_rules! ops {
  (
    $(#[$meta:meta])*
    pub enum $name:ident {
      $($(#[$vmeta:meta])* $variant:ident = $byte:literal => $text:literal,)*
    }
  ) => {
    $(#[$meta])*
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub enum $name {
      $($(#[$vmeta])* $variant,)*
    }

    impl $name {
      /// Every operator.
      pub const ALL: &'static [$name] = &[$($name::$variant,)*];

      /// Returns the operator with serialized code `byte`.
      pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
          $($byte => Some($name::$variant),)*
          _ => None,
        }
      }

      /// Returns this operator's serialized code.
      pub fn byte(self) -> u8 {
        match self {
          $($name::$variant => $byte,)*
        }
      }

      /// Returns the operator with text form `text`.
      pub fn from_text(text: &str) -> Option<Self> {
        match text {
          $($text => Some($name::$variant),)*
          _ => None,
        }
      }

      /// Returns this operator's text form.
      pub fn text(self) -> &'static str {
        match self {
          $($name::$variant => $text,)*
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.text())
      }
    }
  };
}

ops! {
  /// An operator with two operands.
  pub enum BinaryOp {
    /// Addition.
    Add = b'+' => "+",
    /// Subtraction.
    Sub = b'-' => "-",
    /// Multiplication.
    Mul = b'*' => "*",
    /// Truncating division.
    Div = b'/' => "/",
    /// Remainder.
    Rem = b'%' => "%",
    /// Exponentiation, rounded to the nearest integer.
    Pow = b'^' => "^",
    /// Logical and.
    And = b'&' => "AND",
    /// Logical or.
    Or = b'|' => "OR",
    /// Logical exclusive or.
    Xor = b'@' => "XOR",
    /// Equality.
    Eq = b'=' => "=",
    /// Inequality.
    Ne = b'_' => "!=",
    /// Greater than.
    Gt = b'>' => ">",
    /// Less than.
    Lt = b'<' => "<",
    /// Greater than or equal.
    Ge = b'.' => ">=",
    /// Less than or equal.
    Le = b',' => "<=",
  }
}

ops! {
  /// An operator with one operand.
  pub enum UnaryOp {
    /// Logical not.
    Not = b'!' => "NOT",
    /// Whether the party holds an item.
    HasItem = b'I' => "hasItem",
    /// Whether the party holds an amount of gold.
    HasGold = b'G' => "hasGold",
  }
}

/// An expression tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
  /// A constant.
  Literal(i32),
  /// A variable, looked up in the [`Context`].
  ///
  /// [`Context`]: trait.Context.html
  Var(String),
  /// A unary operator and its operand.
  Unary(UnaryOp, Box<Expr>),
  /// A binary operator and its operands.
  Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

fn truth(b: bool) -> i32 {
  b as i32
}

impl Expr {
  /// The deepest nesting [`read`] accepts.
  ///
  /// [`read`]: #method.read
  pub const MAX_DEPTH: usize = 256;

  /// Builds a unary node.
  pub fn unary(op: UnaryOp, operand: Expr) -> Self {
    Expr::Unary(op, Box::new(operand))
  }

  /// Builds a binary node.
  pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
    Expr::Binary(op, Box::new(lhs), Box::new(rhs))
  }

  /// Evaluates this expression. Truth values are 1 and 0, and any nonzero
  /// value counts as true.
  ///
  /// ```
  /// # use ofrip::script::{Expr, NoVars};
  /// let e: Expr = "AND >= 3 2 NOT 0".parse().unwrap();
  /// assert_eq!(e.evaluate(&NoVars).unwrap(), 1);
  /// ```
  pub fn evaluate(&self, ctx: &dyn Context) -> Result<i32, Error> {
    match self {
      Expr::Literal(v) => Ok(*v),
      Expr::Var(name) => Ok(ctx.var(name)),
      Expr::Unary(op, operand) => {
        let v = operand.evaluate(ctx)?;
        Ok(match op {
          UnaryOp::Not => truth(v == 0),
          UnaryOp::HasItem => truth(ctx.has_item(v)),
          UnaryOp::HasGold => truth(ctx.has_gold(v)),
        })
      }
      Expr::Binary(op, lhs, rhs) => {
        let l = lhs.evaluate(ctx)?;
        match op {
          BinaryOp::And if l == 0 => return Ok(0),
          BinaryOp::Or if l != 0 => return Ok(1),
          _ => {}
        }
        let r = rhs.evaluate(ctx)?;
        Ok(match op {
          BinaryOp::Add => l.wrapping_add(r),
          BinaryOp::Sub => l.wrapping_sub(r),
          BinaryOp::Mul => l.wrapping_mul(r),
          BinaryOp::Div if r == 0 => return Err(Error::DivideByZero),
          BinaryOp::Div => l.wrapping_div(r),
          BinaryOp::Rem if r == 0 => return Err(Error::DivideByZero),
          BinaryOp::Rem => l.wrapping_rem(r),
          BinaryOp::Pow => ((l as f64).powf(r as f64) + 0.5).floor() as i32,
          BinaryOp::And | BinaryOp::Or => truth(r != 0),
          BinaryOp::Xor => truth((l != 0) != (r != 0)),
          BinaryOp::Eq => truth(l == r),
          BinaryOp::Ne => truth(l != r),
          BinaryOp::Gt => truth(l > r),
          BinaryOp::Lt => truth(l < r),
          BinaryOp::Ge => truth(l >= r),
          BinaryOp::Le => truth(l <= r),
        })
      }
    }
  }

  /// Writes the byte serialization of this expression into `w`.
  pub fn write(&self, w: &mut impl Write) -> io::Result<()> {
    match self {
      Expr::Literal(v) => {
        w.write_all(&[TAG_LITERAL])?;
        w.write_all(&v.to_le_bytes())
      }
      Expr::Var(name) => {
        w.write_all(&[TAG_VAR])?;
        w.write_all(name.as_bytes())?;
        w.write_all(&[0])
      }
      Expr::Unary(op, operand) => {
        w.write_all(&[TAG_UNARY, op.byte()])?;
        operand.write(w)
      }
      Expr::Binary(op, lhs, rhs) => {
        w.write_all(&[TAG_BINARY, op.byte()])?;
        lhs.write(w)?;
        rhs.write(w)
      }
    }
  }

  /// Returns the byte serialization of this expression.
  ///
  /// ```
  /// # use ofrip::script::Expr;
  /// let e: Expr = "+ x 1".parse().unwrap();
  /// assert_eq!(e.to_bytes(), b"\x02+\x01x\x00\x00\x01\x00\x00\x00");
  /// ```
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut out = Vec::new();
    // Writing into a Vec never fails.
    let _ = self.write(&mut out);
    out
  }

  /// Reads one serialized expression from `r`.
  pub fn read(r: &mut impl Read) -> Result<Self, Error> {
    Self::read_at_depth(r, 0)
  }

  fn read_at_depth(r: &mut impl Read, depth: usize) -> Result<Self, Error> {
    if depth > Self::MAX_DEPTH {
      return Err(Error::TooDeep);
    }

    match read_byte(r)? {
      TAG_LITERAL => {
        let mut v = [0; 4];
        r.read_exact(&mut v).map_err(|_| Error::Truncated)?;
        Ok(Expr::Literal(i32::from_le_bytes(v)))
      }
      TAG_VAR => {
        let mut name = Vec::new();
        loop {
          match read_byte(r)? {
            0 => break,
            b => name.push(b),
          }
        }
        Ok(Expr::Var(String::from_utf8_lossy(&name).into_owned()))
      }
      TAG_UNARY => {
        let byte = read_byte(r)?;
        let op = UnaryOp::from_byte(byte).ok_or(Error::UnknownOperator(byte))?;
        Ok(Expr::unary(op, Self::read_at_depth(r, depth + 1)?))
      }
      TAG_BINARY => {
        let byte = read_byte(r)?;
        let op = BinaryOp::from_byte(byte).ok_or(Error::UnknownOperator(byte))?;
        let lhs = Self::read_at_depth(r, depth + 1)?;
        let rhs = Self::read_at_depth(r, depth + 1)?;
        Ok(Expr::binary(op, lhs, rhs))
      }
      tag => Err(Error::UnknownTag(tag)),
    }
  }

  /// Decodes an expression that spans all of `bytes`.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
    let mut r = bytes;
    let expr = Self::read(&mut r)?;
    match r.len() {
      0 => Ok(expr),
      n => Err(Error::TrailingBytes(n)),
    }
  }
}

fn read_byte(r: &mut impl Read) -> Result<u8, Error> {
  let mut b = [0];
  r.read_exact(&mut b).map_err(|_| Error::Truncated)?;
  Ok(b[0])
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Expr::Literal(v) => write!(f, "{}", v),
      Expr::Var(name) => f.write_str(name),
      Expr::Unary(op, operand) => write!(f, "{} {}", op, operand),
      Expr::Binary(op, lhs, rhs) => write!(f, "{} {} {}", op, lhs, rhs),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::script::NoVars;
  use std::collections::HashMap;

  fn lit(v: i32) -> Expr {
    Expr::Literal(v)
  }

  fn var(name: &str) -> Expr {
    Expr::Var(name.into())
  }

  macro_rules! assert_eval {
    ($op:ident, $l:expr, $r:expr => $want:expr) => {
      assert_eq!(
        Expr::binary(BinaryOp::$op, lit($l), lit($r)).evaluate(&NoVars),
        $want,
        "{} {} {}",
        BinaryOp::$op,
        $l,
        $r,
      );
    };
  }

  #[test]
  fn arithmetic() {
    assert_eval!(Add, 2, 3 => Ok(5));
    assert_eval!(Sub, 2, 3 => Ok(-1));
    assert_eval!(Mul, -4, 3 => Ok(-12));
    assert_eval!(Div, 7, 2 => Ok(3));
    assert_eval!(Div, -7, 2 => Ok(-3));
    assert_eval!(Rem, 7, 3 => Ok(1));
    assert_eval!(Rem, -7, 3 => Ok(-1));
    assert_eval!(Pow, 2, 10 => Ok(1024));
    assert_eval!(Pow, 2, -1 => Ok(1));
    assert_eval!(Pow, 2, -2 => Ok(0));
    assert_eval!(Add, i32::MAX, 1 => Ok(i32::MIN));
  }

  #[test]
  fn division_by_zero_is_an_error() {
    assert_eval!(Div, 1, 0 => Err(Error::DivideByZero));
    assert_eval!(Rem, 1, 0 => Err(Error::DivideByZero));
    assert_eval!(Div, i32::MIN, -1 => Ok(i32::MIN));
  }

  #[test]
  fn logic_and_comparison() {
    assert_eval!(And, 5, 7 => Ok(1));
    assert_eval!(And, 5, 0 => Ok(0));
    assert_eval!(Or, 0, -2 => Ok(1));
    assert_eval!(Or, 0, 0 => Ok(0));
    assert_eval!(Xor, 3, 4 => Ok(0));
    assert_eval!(Xor, 3, 0 => Ok(1));
    assert_eval!(Eq, 3, 3 => Ok(1));
    assert_eval!(Ne, 3, 3 => Ok(0));
    assert_eval!(Gt, 3, 2 => Ok(1));
    assert_eval!(Lt, 3, 2 => Ok(0));
    assert_eval!(Ge, 2, 2 => Ok(1));
    assert_eval!(Le, 3, 2 => Ok(0));
  }

  #[test]
  fn and_or_short_circuit() {
    let boom = Expr::binary(BinaryOp::Div, lit(1), lit(0));
    let e = Expr::binary(BinaryOp::And, lit(0), boom.clone());
    assert_eq!(e.evaluate(&NoVars), Ok(0));
    let e = Expr::binary(BinaryOp::Or, lit(2), boom.clone());
    assert_eq!(e.evaluate(&NoVars), Ok(1));
    let e = Expr::binary(BinaryOp::And, lit(1), boom);
    assert_eq!(e.evaluate(&NoVars), Err(Error::DivideByZero));
  }

  #[test]
  fn unary_ops() {
    assert_eq!(Expr::unary(UnaryOp::Not, lit(0)).evaluate(&NoVars), Ok(1));
    assert_eq!(Expr::unary(UnaryOp::Not, lit(9)).evaluate(&NoVars), Ok(0));
    assert_eq!(Expr::unary(UnaryOp::HasItem, lit(3)).evaluate(&NoVars), Ok(0));
    assert_eq!(Expr::unary(UnaryOp::HasGold, lit(3)).evaluate(&NoVars), Ok(0));
  }

  #[test]
  fn variables_come_from_context() {
    let mut vars = HashMap::new();
    vars.insert("gold".to_string(), 120);
    let e = Expr::binary(BinaryOp::Ge, var("gold"), lit(100));
    assert_eq!(e.evaluate(&vars), Ok(1));
    assert_eq!(e.evaluate(&NoVars), Ok(0));
  }

  #[test]
  fn custom_context() {
    struct Party;
    impl Context for Party {
      fn var(&self, _: &str) -> i32 {
        0
      }
      fn has_item(&self, item: i32) -> bool {
        item == 3
      }
    }
    assert_eq!(Expr::unary(UnaryOp::HasItem, lit(3)).evaluate(&Party), Ok(1));
    assert_eq!(Expr::unary(UnaryOp::HasItem, lit(4)).evaluate(&Party), Ok(0));
  }

  #[test]
  fn serialization() {
    let e = Expr::binary(
      BinaryOp::Ne,
      Expr::unary(UnaryOp::Not, var("ab")),
      lit(-2),
    );
    let bytes = e.to_bytes();
    assert_eq!(
      bytes,
      vec![2, b'_', 3, b'!', 1, b'a', b'b', 0, 0, 0xfe, 0xff, 0xff, 0xff]
    );
    assert_eq!(Expr::from_bytes(&bytes), Ok(e));
  }

  #[test]
  fn bad_bytes() {
    assert_eq!(Expr::from_bytes(&[7]), Err(Error::UnknownTag(7)));
    assert_eq!(
      Expr::from_bytes(&[3, b'?', 0, 0, 0, 0, 0]),
      Err(Error::UnknownOperator(b'?'))
    );
    assert_eq!(Expr::from_bytes(&[0, 1, 2]), Err(Error::Truncated));
    assert_eq!(Expr::from_bytes(&[1, b'x']), Err(Error::Truncated));
    assert_eq!(
      Expr::from_bytes(&[0, 0, 0, 0, 0, 9]),
      Err(Error::TrailingBytes(1))
    );
    assert_eq!(Expr::from_bytes(&[]), Err(Error::Truncated));
  }

  #[test]
  fn deep_nesting_is_refused() {
    let mut bytes = vec![];
    for _ in 0..1000 {
      bytes.extend_from_slice(&[3, b'!']);
    }
    bytes.extend_from_slice(&[0, 0, 0, 0, 0]);
    assert_eq!(Expr::from_bytes(&bytes), Err(Error::TooDeep));
  }

  #[test]
  fn display_is_prefix() {
    let e = Expr::binary(
      BinaryOp::And,
      Expr::binary(BinaryOp::Ge, var("gold"), lit(100)),
      Expr::unary(UnaryOp::HasItem, lit(3)),
    );
    assert_eq!(e.to_string(), "AND >= gold 100 hasItem 3");
  }

  #[test]
  fn op_codes_are_distinct() {
    for op in BinaryOp::ALL {
      assert_eq!(BinaryOp::from_byte(op.byte()), Some(*op));
      assert_eq!(BinaryOp::from_text(op.text()), Some(*op));
    }
    for op in UnaryOp::ALL {
      assert_eq!(UnaryOp::from_byte(op.byte()), Some(*op));
    }
  }
}
