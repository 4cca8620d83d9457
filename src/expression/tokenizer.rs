use log::warn;
use regex::Regex;
use strum_macros::Display;

/// a module that scans raw input text and emits typed lexical tokens.
/// Patterns overlap (a leading "3x^2" could be read as a number, an x-term
/// or an arithmetic run), so they are tried in a fixed priority order and
/// the first accepted match at the start of the remaining text wins.

/// anchored pattern sources; the parser reuses them for secondary matches
pub const NUMBER_PATTERN: &str = r"^[-+]?\d+(\.\d+)?";
pub const X_TERM_PATTERN: &str =
    r"^([-+]?)\s*(\d+(\.\d+)?)?\s*x\s*(\^\s*(\(([^()]+)\)|[-+]?\d+(\.\d+)?))?";
pub const FUNCTION_CALL_PATTERN: &str = r"^([-+]?)\s*(\d+(\.\d+)?)?\s*(arcsin|arccos|arctan|arctg|arcctg|asin|acos|atan|acot|sin|cos|tan|tg|ctg|cot|exp|ln|log)";
pub const NAMED_CONSTANT_PATTERN: &str =
    r"^([-+]?)\s*(\d+(\.\d+)?)?\s*(e|pi)(\s*\^\s*(\(([^()]+)\)|[-+]?\d+(\.\d+)?))?";
pub const EXPONENTIATED_CONSTANT_PATTERN: &str =
    r"^([-+]?\d+(\.\d+)?)\s*(\^\s*(\(([^()]+)\)|[-+]?\d+(\.\d+)?))?";
pub const SUB_EXPRESSION_PATTERN: &str = r"^[-+]?\d+(\.\d+)?([-+*/^][-+]?\d+(\.\d+)?)*";
pub const OPERATOR_PATTERN: &str = r"^[+\-*/^]";
pub const LEFT_PARENTHESIS_PATTERN: &str = r"^\(";
pub const RIGHT_PARENTHESIS_PATTERN: &str = r"^\)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    Number,
    XTerm,
    FunctionCall,
    NamedConstant,
    ExponentiatedConstant,
    SubExpression,
    Operator,
    LeftParenthesis,
    RightParenthesis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

struct TokenPattern {
    kind: TokenKind,
    regex: Regex,
}

fn token_patterns() -> Vec<TokenPattern> {
    let table = [
        (TokenKind::Number, NUMBER_PATTERN),
        (TokenKind::XTerm, X_TERM_PATTERN),
        (TokenKind::FunctionCall, FUNCTION_CALL_PATTERN),
        (TokenKind::NamedConstant, NAMED_CONSTANT_PATTERN),
        (
            TokenKind::ExponentiatedConstant,
            EXPONENTIATED_CONSTANT_PATTERN,
        ),
        (TokenKind::SubExpression, SUB_EXPRESSION_PATTERN),
        (TokenKind::Operator, OPERATOR_PATTERN),
        (TokenKind::LeftParenthesis, LEFT_PARENTHESIS_PATTERN),
        (TokenKind::RightParenthesis, RIGHT_PARENTHESIS_PATTERN),
    ];
    table
        .into_iter()
        .map(|(kind, source)| TokenPattern {
            kind,
            regex: Regex::new(source).unwrap(),
        })
        .collect()
}

fn is_value_shaped(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number
            | TokenKind::XTerm
            | TokenKind::FunctionCall
            | TokenKind::NamedConstant
            | TokenKind::ExponentiatedConstant
            | TokenKind::SubExpression
    )
}

// a leading sign belongs to the value only where a term may start: at the
// beginning of the input, after an operator or after an opening parenthesis
fn sign_may_bind(previous: Option<TokenKind>) -> bool {
    matches!(
        previous,
        None | Some(TokenKind::Operator) | Some(TokenKind::LeftParenthesis)
    )
}

/// Splits the input into tokens, trying every pattern in priority order
/// against the unconsumed prefix. Two guards resolve overlaps the anchored
/// regexes cannot express:
/// - a match immediately followed by an ASCII letter is rejected, so that
///   "3x^2" falls through to the x-term pattern and "3sin" to the function
///   pattern instead of stopping at the number "3";
/// - a match starting with '+'/'-' is rejected in positions where the sign
///   must act as a binary operator.
///
/// If no pattern matches at the current position the whole input is given
/// up on: the unrecognized fragment is logged and an empty vector returned.
pub fn tokenize(input: &str) -> Vec<Token> {
    let patterns = token_patterns();
    let mut tokens: Vec<Token> = Vec::new();
    let mut remaining = input.trim();

    while !remaining.is_empty() {
        let previous = tokens.last().map(|token| token.kind);
        let mut matched = false;

        for pattern in &patterns {
            let Some(found) = pattern.regex.find(remaining) else {
                continue;
            };
            let text = found.as_str();
            if is_value_shaped(pattern.kind) {
                if (text.starts_with('+') || text.starts_with('-')) && !sign_may_bind(previous) {
                    continue;
                }
                let next_char = remaining[text.len()..].chars().next();
                if next_char.is_some_and(|c| c.is_ascii_alphabetic()) {
                    continue;
                }
            }
            tokens.push(Token {
                kind: pattern.kind,
                text: text.to_string(),
            });
            remaining = remaining[text.len()..].trim_start();
            matched = true;
            break;
        }

        if !matched {
            warn!("unrecognized token at \"{}\", giving up on this input", remaining);
            return Vec::new();
        }
    }

    tokens
}
