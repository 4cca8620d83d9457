#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module that splits raw input text into typed lexical tokens with
/// prioritized, overlapping patterns
///# Example
/// ```
/// use RustedGrapher::expression::tokenizer::tokenize;
/// let tokens = tokenize("3x^2+4");
/// for token in &tokens {
///     println!("{} '{}'", token.kind, token.text);
/// }
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod tokenizer;
///____________________________________________________________________________________________________________________________
/// # Expression parser
/// a module that turns the token sequence into a recursive Expression tree
///# Example
/// ```
/// use RustedGrapher::expression::expression_engine::Expression;
/// let parsed_expression = Expression::parse_expression("3x^2+4");
/// println!(" parsed_expression {}", parsed_expression);
/// println!("value at x = 2: {}", parsed_expression.evaluate(2.0));
/// ```
pub mod expression_parser;
///____________________________________________________________________________________________________________________________
/// # Expression engine
/// the tree data model (Member, Term, Expression), the closed operation
/// enums and the recursive numeric evaluation semantics
///# Example
/// ```
/// use RustedGrapher::expression::expression_engine::{Expression, Member, Term};
/// let expression = Expression::from_terms(vec![
///     Member::Term(Term::new(2.0, 3.0)),
/// ]);
/// assert_eq!(expression.evaluate(2.0), 16.0);
/// ```
pub mod expression_engine;
///____________________________________________________________________________________________________________________________
/// # Plot function
/// binds a parsed expression to a sampling range and generates the point
/// sequences consumed by a plotting front-end
///# Example
/// ```
/// use RustedGrapher::expression::plot_function::{PlotFunction, SamplingRange};
/// let function = PlotFunction::from_input("3sin(2x+4)+(1/2)e^(-x^2)+5", SamplingRange::new(-2.0, 2.0));
/// let (x_values, y_values) = function.generate_points();
/// assert_eq!(x_values.len(), y_values.len());
/// ```
pub mod plot_function;
