/// parse a plot task document with one key : comma-separated-values pair
/// per line under a "plot" section title:
///
/// plot
/// expression: 3sin(2x+4)+5
/// range: -2, 2
/// samples_per_unit: 500
///
/// The expression and the range are required, the grid density is optional;
/// values run to the end of the line, so expressions may contain spaces.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;

use crate::expression::expression_engine::Expression;
use crate::expression::plot_function::{PlotFunction, SamplingRange};

type SectionMap = HashMap<String, Vec<String>>;

/// One parsed plot task, ready to be turned into a PlotFunction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTask {
    pub expression: String,
    pub range: (f64, f64),
    pub samples_per_unit: Option<f64>,
}

impl PlotTask {
    pub fn build(&self) -> PlotFunction {
        let expression = Expression::parse_expression(&self.expression);
        let range = SamplingRange::new(self.range.0, self.range.1);
        match self.samples_per_unit {
            Some(density) => PlotFunction::with_density(expression, range, density),
            None => PlotFunction::new(expression, range),
        }
    }
}

/// Parses a title (word characters without spaces)
pub fn parse_title(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));

    let mut parser = map(parser, String::from);
    let (input, result) = parser.parse(input)?;

    let input = input.trim_start();
    Ok((input, result))
}

/// Parses a key (word characters without spaces)
pub fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));

    let mut parser = map(parser, String::from);
    let (input, result) = parser.parse(input)?;

    Ok((input, result))
}

/// Parses a single value - everything up to a comma, a semicolon or a line end
pub fn parse_value(input: &str) -> IResult<&str, String> {
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ';' | '\n' | '\r'));
    let mut value_parser = map(value_parser, |s: &str| s.trim().to_string());

    let (input, result) = value_parser.parse(input)?;

    Ok((input, result))
}

pub fn parse_value_list(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    let (input, result) = value_parser.parse(input)?;

    Ok((input, result))
}

/// Parses a key-value pair where value is a list
pub fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<String>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input, result))
}

/// Parses the section: a title followed by key-value pairs
pub fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, multispace0));
    let (input, pairs) = parser.parse(input)?;

    let mut section_map = HashMap::new();
    for (key, values) in pairs {
        section_map.insert(key, values);
    }

    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, %, or ;)
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

fn required_float(values: &[String], key: &str, position: usize) -> Result<f64, String> {
    let raw = values
        .get(position)
        .ok_or(format!("'{}' is missing value {}", key, position))?;
    raw.parse::<f64>()
        .map_err(|e| format!("'{}' value '{}' did not parse: {}", key, raw, e))
}

/// Parses the whole document into a PlotTask
pub fn parse_plot_task(input: &str) -> Result<PlotTask, String> {
    let filtered_input = filter_comments(input);
    let parse_result = parse_section(&filtered_input);

    match parse_result {
        Ok((remaining, (title, section))) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            if title != "plot" {
                return Err(format!("Expected a 'plot' section, found '{}'", title));
            }

            let expression = section
                .get("expression")
                .and_then(|values| values.first())
                .ok_or("Missing 'expression' key".to_string())?
                .clone();

            let range_values = section
                .get("range")
                .ok_or("Missing 'range' key".to_string())?;
            if range_values.len() != 2 {
                return Err(format!(
                    "'range' needs exactly two bounds, got {}",
                    range_values.len()
                ));
            }
            let a = required_float(range_values, "range", 0)?;
            let b = required_float(range_values, "range", 1)?;

            let samples_per_unit = match section.get("samples_per_unit") {
                Some(values) => Some(required_float(values, "samples_per_unit", 0)?),
                None => None,
            };

            Ok(PlotTask {
                expression,
                range: (a, b),
                samples_per_unit,
            })
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}
