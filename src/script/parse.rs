//! The text form of expressions.

use std::str::FromStr;

use pest::error::ErrorVariant;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::script::BinaryOp;
use crate::script::Error;
use crate::script::Expr;
use crate::script::UnaryOp;

#[derive(Parser)]
#[grammar = "script/grammar.pest"]
struct PegParser;

/// Parses the prefix-notation text form of an expression.
///
/// ```
/// # use ofrip::script::parse;
/// let e = parse("+ 1 * 2 3").unwrap();
/// assert_eq!(e.to_string(), "+ 1 * 2 3");
/// ```
pub fn parse(src: &str) -> Result<Expr, Error> {
  use pest::Parser;
  let mut pairs = match PegParser::parse(Rule::Input, src) {
    Ok(pairs) => pairs,
    Err(err) => {
      let pos = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((pos, _)) => pos,
      };
      return Err(Error::Syntax {
        pos,
        message: match err.variant {
          ErrorVariant::ParsingError { positives, .. } => {
            format!("expected one of {:?}", positives)
          }
          ErrorVariant::CustomError { message } => message,
        },
      });
    }
  };

  let input = pairs.next().unwrap();
  build(input.into_inner().next().unwrap())
}

fn build(pair: Pair<Rule>) -> Result<Expr, Error> {
  let pos = pair.as_span().start();
  match pair.as_rule() {
    Rule::Literal => {
      let text = pair.as_str();
      text.parse::<i32>().map(Expr::Literal).map_err(|_| Error::Syntax {
        pos,
        message: format!("{} does not fit in 32 bits", text),
      })
    }
    Rule::Var => Ok(Expr::Var(pair.as_str().to_string())),
    Rule::Unary => {
      let mut inner = pair.into_inner();
      let op = UnaryOp::from_text(inner.next().unwrap().as_str()).unwrap();
      Ok(Expr::unary(op, build(inner.next().unwrap())?))
    }
    Rule::Binary => {
      let mut inner = pair.into_inner();
      let op = BinaryOp::from_text(inner.next().unwrap().as_str()).unwrap();
      let lhs = build(inner.next().unwrap())?;
      let rhs = build(inner.next().unwrap())?;
      Ok(Expr::binary(op, lhs, rhs))
    }
    _ => unreachable!(),
  }
}

impl FromStr for Expr {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    parse(s)
  }
}
