//! # Expression Engine Module
//!
//! This module provides the data model and the numeric evaluation semantics for
//! parsed plotting expressions. It is the core foundation of the crate: the
//! tokenizer and the parser produce trees made of these types, and the plot
//! function samples them over a range.
//!
//! ## Main Structures and Methods
//!
//! ### `Member` Enum
//! The tagged union of everything a tree position can hold:
//! - **Numbers**: `Number(f64)` - literal numeric leaves
//! - **Terms**: `Term(Term)` - a single x-bearing factor `x^exponent * coefficient`
//! - **Expressions**: `Expression(Box<Expression>)` - a nested weighted combination
//!
//! ### `Expression` Struct
//! An ordered sequence of member terms folded through an optional binary
//! operator, then scaled by a `coefficient`, raised to an `exponent` and
//! finally passed through an optional unary `function_operation`. The
//! coefficient and the exponent are themselves members, so arbitrarily deep
//! structures such as `(1/2) * e^(-x^2)` stay inside the model.
//!
//! ### Key Methods
//! - `parse_expression(input)` - build a tree from input text
//! - `evaluate(x)` - recursively compute the numeric value at a sample point
//!
//! ## Interesting Code Features
//!
//! 1. **Closed operation enums**: `BinaryOp` and `FunctionOperation` are plain
//!    enums dispatched through a single `apply` match, so trees hold no
//!    callable values and stay trivially printable and comparable
//!
//! 2. **Total evaluation**: undefined arithmetic (division by zero, logarithm
//!    of a non-positive number) propagates IEEE-754 infinities and NaN instead
//!    of panicking, so one bad sample never stops a whole sweep

use std::f64::consts::PI;
use std::fmt;

use log::warn;
use strum_macros::Display;

use crate::expression::expression_parser;

/// Binary numeric combinator used to fold an expression's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Maps an operator symbol from the token stream onto the enum. Unknown
    /// symbols fall back to addition with a diagnostic.
    pub fn from_symbol(symbol: &str) -> BinaryOp {
        match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "^" => BinaryOp::Pow,
            _ => {
                warn!("unknown operator symbol '{}', falling back to addition", symbol);
                BinaryOp::Add
            }
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Pow => a.powf(b),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Unary numeric transform applied as the last step of evaluating a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FunctionOperation {
    Exp,
    Ln,
    Sin,
    Cos,
    Tg,
    Ctg,
    Arcsin,
    Arccos,
    Arctg,
    Arcctg,
}

impl FunctionOperation {
    /// Resolves a function name from the input text; both the mathematical
    /// spellings (tg, ctg, arctg) and the programming ones (tan, cot, atan)
    /// are accepted.
    pub fn from_name(name: &str) -> Option<FunctionOperation> {
        match name {
            "exp" => Some(FunctionOperation::Exp),
            "ln" | "log" => Some(FunctionOperation::Ln),
            "sin" => Some(FunctionOperation::Sin),
            "cos" => Some(FunctionOperation::Cos),
            "tg" | "tan" => Some(FunctionOperation::Tg),
            "ctg" | "cot" => Some(FunctionOperation::Ctg),
            "arcsin" | "asin" => Some(FunctionOperation::Arcsin),
            "arccos" | "acos" => Some(FunctionOperation::Arccos),
            "arctg" | "atan" | "arctan" => Some(FunctionOperation::Arctg),
            "arcctg" | "acot" => Some(FunctionOperation::Arcctg),
            _ => None,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        match self {
            FunctionOperation::Exp => value.exp(),
            FunctionOperation::Ln => value.ln(),
            FunctionOperation::Sin => value.sin(),
            FunctionOperation::Cos => value.cos(),
            FunctionOperation::Tg => value.tan(),
            FunctionOperation::Ctg => 1.0 / value.tan(),
            FunctionOperation::Arcsin => value.asin(),
            FunctionOperation::Arccos => value.acos(),
            FunctionOperation::Arctg => value.atan(),
            FunctionOperation::Arcctg => PI / 2.0 - value.atan(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FunctionOperation::Exp => "exp",
            FunctionOperation::Ln => "ln",
            FunctionOperation::Sin => "sin",
            FunctionOperation::Cos => "cos",
            FunctionOperation::Tg => "tg",
            FunctionOperation::Ctg => "ctg",
            FunctionOperation::Arcsin => "arcsin",
            FunctionOperation::Arccos => "arccos",
            FunctionOperation::Arctg => "arctg",
            FunctionOperation::Arcctg => "arcctg",
        }
    }
}

/// One position in an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Number(f64),
    Term(Term),
    Expression(Box<Expression>),
}

impl Member {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Member::Number(value) => *value,
            Member::Term(term) => term.evaluate(x),
            Member::Expression(expression) => expression.evaluate(x),
        }
    }
}

impl From<f64> for Member {
    fn from(value: f64) -> Member {
        Member::Number(value)
    }
}

impl From<Term> for Member {
    fn from(term: Term) -> Member {
        Member::Term(term)
    }
}

impl From<Expression> for Member {
    fn from(expression: Expression) -> Member {
        Member::Expression(Box::new(expression))
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Member::Number(value) => write!(f, "{}", value),
            Member::Term(term) => write!(f, "{}", term),
            Member::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

fn member_is_one(member: &Member) -> bool {
    matches!(member, Member::Number(value) if *value == 1.0)
}

/// A single x-bearing factor: `x^exponent * coefficient`, optionally passed
/// through a unary transform. The coefficient and the exponent are members,
/// which covers parenthesized exponents like `x^(2+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coefficient: Box<Member>,
    pub exponent: Box<Member>,
    pub function_operation: Option<FunctionOperation>,
}

impl Term {
    pub fn new(coefficient: f64, exponent: f64) -> Term {
        Term {
            coefficient: Box::new(Member::Number(coefficient)),
            exponent: Box::new(Member::Number(exponent)),
            function_operation: None,
        }
    }

    pub fn with_exponent_member(coefficient: f64, exponent: Member) -> Term {
        Term {
            coefficient: Box::new(Member::Number(coefficient)),
            exponent: Box::new(exponent),
            function_operation: None,
        }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let result = x.powf(self.exponent.evaluate(x)) * self.coefficient.evaluate(x);
        match self.function_operation {
            Some(operation) => operation.apply(result),
            None => result,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let core = format!("{}*x^{}", self.coefficient, self.exponent);
        match self.function_operation {
            Some(operation) => write!(f, "{}({})", operation.name(), core),
            None => write!(f, "{}", core),
        }
    }
}

/// A weighted, optionally transformed combination of sub-terms. Evaluation
/// folds the terms through `operator`, multiplies by `coefficient`, raises to
/// `exponent` and finally applies `function_operation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub terms: Vec<Member>,
    pub coefficient: Member,
    pub exponent: Member,
    pub operator: Option<BinaryOp>,
    pub function_operation: Option<FunctionOperation>,
}

impl Default for Expression {
    fn default() -> Expression {
        Expression::new()
    }
}

impl Expression {
    pub fn new() -> Expression {
        Expression {
            terms: Vec::new(),
            coefficient: Member::Number(1.0),
            exponent: Member::Number(1.0),
            operator: None,
            function_operation: None,
        }
    }

    pub fn from_terms(terms: Vec<Member>) -> Expression {
        Expression {
            terms,
            ..Expression::new()
        }
    }

    pub fn with_coefficient(mut self, coefficient: Member) -> Expression {
        self.coefficient = coefficient;
        self
    }

    pub fn with_exponent(mut self, exponent: Member) -> Expression {
        self.exponent = exponent;
        self
    }

    pub fn with_operator(mut self, operator: BinaryOp) -> Expression {
        self.operator = Some(operator);
        self
    }

    pub fn with_function_operation(mut self, operation: FunctionOperation) -> Expression {
        self.function_operation = Some(operation);
        self
    }

    /// Builds an expression tree from input text. Malformed input degrades to
    /// an expression with no terms, which evaluates to a flat zero.
    pub fn parse_expression(input: &str) -> Expression {
        expression_parser::parse_expression_text(input)
    }

    /// Recursive evaluation at a sample point. All terms are folded
    /// left-to-right through the node's operator (addition when none was
    /// recorded), seeding the accumulator with the first term; an expression
    /// with no terms evaluates to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut members = self.terms.iter();
        let mut result = match members.next() {
            Some(first) => first.evaluate(x),
            None => 0.0,
        };
        let fold = self.operator.unwrap_or(BinaryOp::Add);
        for member in members {
            result = fold.apply(result, member.evaluate(x));
        }

        result *= self.coefficient.evaluate(x);
        result = result.powf(self.exponent.evaluate(x));

        match self.function_operation {
            Some(operation) => operation.apply(result),
            None => result,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = format!(
            " {} ",
            self.operator.unwrap_or(BinaryOp::Add).symbol()
        );
        let joined = self
            .terms
            .iter()
            .map(|member| member.to_string())
            .collect::<Vec<String>>()
            .join(&separator);
        let mut core = format!("({})", joined);
        if !member_is_one(&self.exponent) {
            core = format!("{}^({})", core, self.exponent);
        }
        if !member_is_one(&self.coefficient) {
            core = format!("{}*{}", self.coefficient, core);
        }
        match self.function_operation {
            Some(operation) => write!(f, "{}({})", operation.name(), core),
            None => write!(f, "{}", core),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_dispatch() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(BinaryOp::Sub.apply(2.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Mul.apply(2.0, 3.0), 6.0);
        assert_eq!(BinaryOp::Div.apply(3.0, 2.0), 1.5);
        assert_eq!(BinaryOp::Pow.apply(2.0, 10.0), 1024.0);
    }

    #[test]
    fn test_unknown_operator_symbol_defaults_to_addition() {
        assert_eq!(BinaryOp::from_symbol("%"), BinaryOp::Add);
    }

    #[test]
    fn test_function_operation_names() {
        assert_eq!(FunctionOperation::from_name("sin"), Some(FunctionOperation::Sin));
        assert_eq!(FunctionOperation::from_name("tan"), Some(FunctionOperation::Tg));
        assert_eq!(FunctionOperation::from_name("log"), Some(FunctionOperation::Ln));
        assert_eq!(FunctionOperation::from_name("gamma"), None);
    }

    #[test]
    fn test_term_evaluation() {
        let term = Term::new(2.0, 3.0);
        assert_eq!(term.evaluate(2.0), 16.0);
    }

    #[test]
    fn test_term_defaults_hold() {
        let term = Term::new(1.0, 1.0);
        assert_eq!(term.evaluate(5.0), 5.0);
    }

    #[test]
    fn test_empty_expression_evaluates_to_zero() {
        let expression = Expression::new();
        assert_eq!(expression.evaluate(3.0), 0.0);
    }

    #[test]
    fn test_terms_fold_through_operator() {
        let expression = Expression::from_terms(vec![
            Member::Number(2.0),
            Member::Number(3.0),
            Member::Number(4.0),
        ])
        .with_operator(BinaryOp::Mul);
        assert_eq!(expression.evaluate(0.0), 24.0);
    }

    #[test]
    fn test_missing_operator_means_addition() {
        let expression =
            Expression::from_terms(vec![Member::Number(2.0), Member::Number(3.0)]);
        assert_eq!(expression.evaluate(0.0), 5.0);
    }

    #[test]
    fn test_coefficient_then_exponent_then_transform() {
        // (2 + 2) * 2, squared, then ln
        let expression =
            Expression::from_terms(vec![Member::Number(2.0), Member::Number(2.0)])
                .with_coefficient(Member::Number(2.0))
                .with_exponent(Member::Number(2.0))
                .with_function_operation(FunctionOperation::Ln);
        assert_eq!(expression.evaluate(0.0), 64.0_f64.ln());
    }

    #[test]
    fn test_division_by_zero_is_not_fatal() {
        let expression =
            Expression::from_terms(vec![Member::Number(1.0), Member::Number(0.0)])
                .with_operator(BinaryOp::Div);
        assert!(expression.evaluate(0.0).is_infinite());
    }

    #[test]
    fn test_ln_of_negative_is_nan() {
        let expression = Expression::from_terms(vec![Member::Number(-1.0)])
            .with_function_operation(FunctionOperation::Ln);
        assert!(expression.evaluate(0.0).is_nan());
    }

    #[test]
    fn test_display_round_trip_readable() {
        let expression = Expression::from_terms(vec![
            Member::Term(Term::new(3.0, 2.0)),
            Member::Number(4.0),
        ]);
        assert_eq!(expression.to_string(), "(3*x^2 + 4)");
    }
}
