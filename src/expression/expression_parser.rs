use std::f64::consts::{E, PI};

use log::warn;
use regex::Regex;

use crate::expression::expression_engine::{BinaryOp, Expression, FunctionOperation, Member, Term};
use crate::expression::tokenizer::{
    EXPONENTIATED_CONSTANT_PATTERN, FUNCTION_CALL_PATTERN, NAMED_CONSTANT_PATTERN, Token,
    TokenKind, X_TERM_PATTERN, tokenize,
};

/// a module that turns a token sequence into a recursive Expression tree.
//
//                  parse recursion diagram
//                "3sin(2x+4)+(1/2)e^(-x^2)+5"
//                |________________________________|
//                | level 0: FnCall  ( ... ) + ( ...|
//                |    |                            |
//                |   \|/  level 1: "2x+4" -> RP    |
//                |________________________________|
//                | level 0 resumes after the RP,   |
//                | "(1/2)" opens level 1 again,    |
//                | "e^(-x^2)" multiplies with it   |
//                |________________________________|
//
// One token stream is shared across all levels through an explicit cursor;
// a recursive call starts just after an opening parenthesis and hands the
// index of its closing parenthesis back to the caller. Only the
// SubExpression token kind re-tokenizes its own text.

/// Top-level entry: tokenize, parse, discard the consumed index.
pub fn parse_expression_text(input: &str) -> Expression {
    parse_expression(input, 0).0
}

/// Tokenizes the input and parses one level starting at `start_index`,
/// returning the expression together with the index the cursor stopped at.
pub fn parse_expression(input: &str, start_index: usize) -> (Expression, usize) {
    let tokens = tokenize(input);
    parse_token_level(&tokens, start_index)
}

/// Parses one nesting level of the shared token slice. The level ends when
/// the slice is exhausted or a closing parenthesis is consumed; the returned
/// index points at that parenthesis so the caller can continue after it.
pub fn parse_token_level(tokens: &[Token], start_index: usize) -> (Expression, usize) {
    let mut terms: Vec<Member> = Vec::new();
    let mut operator: Option<BinaryOp> = None;
    let mut index = start_index;

    while index < tokens.len() {
        let token = &tokens[index];
        // an unsigned value directly after a closing parenthesis multiplies
        // with the just-closed group: (1/2)e^(-x^2) is one term
        let merges_with_previous = index > 0
            && !terms.is_empty()
            && tokens[index - 1].kind == TokenKind::RightParenthesis
            && !token.text.starts_with('+')
            && !token.text.starts_with('-');

        match token.kind {
            TokenKind::Number => match token.text.parse::<f64>() {
                Ok(value) => terms.push(Member::Number(value)),
                Err(_) => {
                    warn!("number token '{}' did not parse, using 0", token.text);
                    terms.push(Member::Number(0.0));
                }
            },
            TokenKind::XTerm => {
                push_term(
                    &mut terms,
                    merges_with_previous,
                    Member::Term(parse_x_term(&token.text)),
                );
            }
            TokenKind::ExponentiatedConstant => {
                push_term(
                    &mut terms,
                    merges_with_previous,
                    Member::Term(parse_exponentiated_constant(&token.text)),
                );
            }
            TokenKind::FunctionCall => {
                if let Some((member, closing_index)) = parse_function_call(tokens, index) {
                    push_term(&mut terms, merges_with_previous, member);
                    index = closing_index;
                }
            }
            TokenKind::NamedConstant => {
                push_term(
                    &mut terms,
                    merges_with_previous,
                    parse_named_constant(&token.text),
                );
            }
            TokenKind::SubExpression => {
                terms.push(Member::Expression(Box::new(parse_expression_text(
                    &token.text,
                ))));
            }
            TokenKind::LeftParenthesis => {
                let (inner, closing_index) = parse_token_level(tokens, index + 1);
                push_term(
                    &mut terms,
                    merges_with_previous,
                    Member::Expression(Box::new(inner)),
                );
                index = closing_index;
            }
            TokenKind::RightParenthesis => {
                let mut expression = Expression::from_terms(terms);
                expression.operator = operator;
                return (expression, index);
            }
            TokenKind::Operator => {}
        }

        // the operator following the current token becomes this level's
        // operator; a later one overwrites it (last operator wins)
        if index + 1 < tokens.len() && tokens[index + 1].kind == TokenKind::Operator {
            operator = Some(BinaryOp::from_symbol(&tokens[index + 1].text));
        }
        index += 1;
    }

    let mut expression = Expression::from_terms(terms);
    expression.operator = operator;
    (expression, index)
}

fn push_term(terms: &mut Vec<Member>, merge: bool, member: Member) {
    if merge {
        if let Some(previous) = terms.pop() {
            let wrapper = Expression::from_terms(vec![member]).with_coefficient(previous);
            terms.push(Member::Expression(Box::new(wrapper)));
            return;
        }
    }
    terms.push(member);
}

fn sign_of(captures: &regex::Captures, group: usize) -> f64 {
    if captures.get(group).map(|m| m.as_str()) == Some("-") {
        -1.0
    } else {
        1.0
    }
}

fn exponent_member(
    parenthesized: Option<regex::Match>,
    bare: Option<regex::Match>,
    text: &str,
) -> Member {
    if let Some(inner) = parenthesized {
        return Member::Expression(Box::new(parse_expression_text(inner.as_str())));
    }
    if let Some(bare) = bare {
        match bare.as_str().trim().parse::<f64>() {
            Ok(value) => return Member::Number(value),
            Err(_) => warn!(
                "exponent '{}' in '{}' did not parse, defaulting to 1",
                bare.as_str(),
                text
            ),
        }
    }
    Member::Number(1.0)
}

/// Secondary match of an x-term token: the sign folds into the coefficient,
/// coefficient and exponent default to 1 when absent, and a parenthesized
/// exponent is parsed recursively. A failed match keeps the defaults.
pub fn parse_x_term(text: &str) -> Term {
    let pattern = Regex::new(X_TERM_PATTERN).unwrap();
    let Some(captures) = pattern.captures(text) else {
        warn!(
            "invalid x-term '{}', coefficient and exponent default to 1",
            text
        );
        return Term::new(1.0, 1.0);
    };
    let coefficient = sign_of(&captures, 1)
        * captures
            .get(2)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
    let exponent = exponent_member(captures.get(6), captures.get(5), text);
    Term {
        coefficient: Box::new(Member::Number(coefficient)),
        exponent: Box::new(exponent),
        function_operation: None,
    }
}

/// Secondary match of an exponentiated-constant token; the coefficient is
/// mandatory here, the exponent defaults to 1.
pub fn parse_exponentiated_constant(text: &str) -> Term {
    let pattern = Regex::new(EXPONENTIATED_CONSTANT_PATTERN).unwrap();
    let Some(captures) = pattern.captures(text) else {
        warn!(
            "invalid exponentiated constant '{}', coefficient and exponent default to 1",
            text
        );
        return Term::new(1.0, 1.0);
    };
    let coefficient = captures
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(1.0);
    let exponent = exponent_member(captures.get(5), captures.get(4), text);
    Term {
        coefficient: Box::new(Member::Number(coefficient)),
        exponent: Box::new(exponent),
        function_operation: None,
    }
}

// builds the coefficient * base^exponent node for an e/pi token
fn parse_named_constant(text: &str) -> Member {
    let pattern = Regex::new(NAMED_CONSTANT_PATTERN).unwrap();
    let Some(captures) = pattern.captures(text) else {
        warn!("invalid named constant '{}', using 0", text);
        return Member::Number(0.0);
    };
    let coefficient = sign_of(&captures, 1)
        * captures
            .get(2)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
    let base = match captures.get(4).map(|m| m.as_str()) {
        Some("pi") => PI,
        _ => E,
    };
    let exponent: Option<Member> = if let Some(inner) = captures.get(7) {
        Some(Member::Expression(Box::new(parse_expression_text(
            inner.as_str(),
        ))))
    } else if let Some(bare) = captures.get(6) {
        match bare.as_str().trim().parse::<f64>() {
            Ok(value) => Some(Member::Number(value)),
            Err(_) => {
                warn!(
                    "exponent '{}' in '{}' did not parse, leaving the base alone",
                    bare.as_str(),
                    text
                );
                None
            }
        }
    } else {
        None
    };

    let mut member = Member::Number(base);
    if let Some(exponent) = exponent {
        member = Member::Expression(Box::new(
            Expression::from_terms(vec![member]).with_exponent(exponent),
        ));
    }
    if coefficient != 1.0 {
        member = Member::Expression(Box::new(
            Expression::from_terms(vec![member]).with_coefficient(Member::Number(coefficient)),
        ));
    }
    member
}

// resolves a function-call token and parses its parenthesized argument from
// the shared stream; returns the finished member and the index of the
// argument's closing parenthesis
fn parse_function_call(tokens: &[Token], index: usize) -> Option<(Member, usize)> {
    let text = &tokens[index].text;
    let pattern = Regex::new(FUNCTION_CALL_PATTERN).unwrap();
    let Some(captures) = pattern.captures(text) else {
        warn!("invalid function call '{}', skipping it", text);
        return None;
    };
    let coefficient = sign_of(&captures, 1)
        * captures
            .get(2)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
    let name = captures.get(4).map(|m| m.as_str()).unwrap_or_default();
    let Some(operation) = FunctionOperation::from_name(name) else {
        warn!("unsupported function name '{}', skipping it", name);
        return None;
    };
    if tokens.get(index + 1).map(|token| token.kind) != Some(TokenKind::LeftParenthesis) {
        warn!(
            "function '{}' is not followed by a parenthesized argument, skipping it",
            name
        );
        return None;
    }

    let (inner, closing_index) = parse_token_level(tokens, index + 2);
    let argument = inner.with_function_operation(operation);
    let member = if coefficient == 1.0 {
        Member::Expression(Box::new(argument))
    } else {
        Member::Expression(Box::new(
            Expression::from_terms(vec![Member::Expression(Box::new(argument))])
                .with_coefficient(Member::Number(coefficient)),
        ))
    };
    Some((member, closing_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variable() {
        let expression = parse_expression_text("x");
        assert_eq!(expression.evaluate(5.0), 5.0);
    }

    #[test]
    fn test_parse_x_term_with_coefficient_and_exponent() {
        let expression = parse_expression_text("2x^3");
        assert_eq!(expression.evaluate(2.0), 16.0);
    }

    #[test]
    fn test_parse_polynomial() {
        let expression = parse_expression_text("3x^2+4");
        assert_eq!(expression.evaluate(2.0), 16.0);
    }

    #[test]
    fn test_parse_parenthesized_division() {
        let expression = parse_expression_text("(1/2)");
        assert_eq!(expression.evaluate(0.0), 0.5);
    }

    #[test]
    fn test_last_operator_wins_at_one_level() {
        // the level keeps a single operator, the one recorded last
        let expression = parse_expression_text("1-2+3");
        assert_eq!(expression.evaluate(0.0), 6.0);
    }

    #[test]
    fn test_malformed_input_gives_empty_expression() {
        let expression = parse_expression_text("3x#2");
        assert!(expression.terms.is_empty());
        assert_eq!(expression.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_x_term_sign_folds_into_coefficient() {
        let term = parse_x_term("-x^2");
        assert_eq!(term.evaluate(3.0), -9.0);
    }

    #[test]
    fn test_x_term_defaults() {
        let term = parse_x_term("x");
        assert_eq!(term.evaluate(7.0), 7.0);
    }

    #[test]
    fn test_x_term_parenthesized_exponent() {
        let expression = parse_expression_text("x^(2+1)");
        assert_eq!(expression.evaluate(2.0), 8.0);
    }

    #[test]
    fn test_exponentiated_constant_secondary_parse() {
        // the x^exponent * coefficient shape applies to this kind as well
        let term = parse_exponentiated_constant("3^2");
        assert_eq!(term.evaluate(2.0), 12.0);
    }

    #[test]
    fn test_parse_function_call_with_coefficient() {
        let expression = parse_expression_text("3sin(2x+4)");
        let expected = 3.0 * (2.0 * 1.0 + 4.0_f64).sin();
        approx::assert_relative_eq!(expression.evaluate(1.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_function_without_argument_is_skipped() {
        let expression = parse_expression_text("sin");
        assert!(expression.terms.is_empty());
        assert_eq!(expression.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_named_constant_with_numeric_exponent() {
        let expression = parse_expression_text("e^2");
        approx::assert_relative_eq!(
            expression.evaluate(0.0),
            std::f64::consts::E.powi(2),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_named_constant_pi() {
        let expression = parse_expression_text("2pi");
        approx::assert_relative_eq!(
            expression.evaluate(0.0),
            2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_implicit_product_after_parenthesis() {
        let expression = parse_expression_text("(1/2)x");
        assert_eq!(expression.evaluate(4.0), 2.0);
    }

    #[test]
    fn test_nested_parentheses() {
        let expression = parse_expression_text("((x))");
        assert_eq!(expression.evaluate(7.0), 7.0);
    }

    #[test]
    fn test_unbalanced_input_degrades_gracefully() {
        let expression = parse_expression_text("(x+2");
        assert_eq!(expression.evaluate(1.0), 3.0);
    }

    #[test]
    fn test_consumed_index_reaches_end() {
        let (_, consumed) = parse_expression("x+1", 0);
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_parenthesis_closes_level_at_its_index() {
        let tokens = tokenize("(x)");
        let (expression, closing_index) = parse_token_level(&tokens, 1);
        assert_eq!(closing_index, 2);
        assert_eq!(expression.evaluate(4.0), 4.0);
    }
}
