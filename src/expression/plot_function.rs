use log::warn;
use nalgebra::DVector;

use crate::expression::expression_engine::Expression;
use crate::expression::expression_parser::parse_expression_text;

/// a module that binds a parsed expression tree to a numeric sampling domain
/// and produces the point sequences consumed by a plotting front-end.

/// default sampling density of the point grid
pub const SAMPLES_PER_UNIT: f64 = 1000.0;

/// Inclusive sampling domain `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingRange {
    pub a: f64,
    pub b: f64,
}

impl SamplingRange {
    pub fn new(a: f64, b: f64) -> SamplingRange {
        SamplingRange { a, b }
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }
}

/// One plotted function: an expression tree, its sampling range and the grid
/// density. Immutable after construction; a new user input builds a whole new
/// instance and the old tree is dropped as a unit.
#[derive(Debug, Clone)]
pub struct PlotFunction {
    pub expression: Expression,
    pub range: SamplingRange,
    pub samples_per_unit: f64,
}

impl PlotFunction {
    pub fn new(expression: Expression, range: SamplingRange) -> PlotFunction {
        PlotFunction {
            expression,
            range,
            samples_per_unit: SAMPLES_PER_UNIT,
        }
    }

    /// Constructor with an explicit grid density; a non-positive density is
    /// replaced by the default.
    pub fn with_density(
        expression: Expression,
        range: SamplingRange,
        samples_per_unit: f64,
    ) -> PlotFunction {
        let samples_per_unit = if samples_per_unit > 0.0 {
            samples_per_unit
        } else {
            warn!(
                "non-positive sampling density {}, using the default {}",
                samples_per_unit, SAMPLES_PER_UNIT
            );
            SAMPLES_PER_UNIT
        };
        PlotFunction {
            expression,
            range,
            samples_per_unit,
        }
    }

    /// Parses the input text and binds the resulting tree to the range.
    /// Malformed input degrades to a flat zero curve.
    pub fn from_input(input: &str, range: SamplingRange) -> PlotFunction {
        PlotFunction::new(parse_expression_text(input), range)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.expression.evaluate(x)
    }

    /// Materializes the full point grid: evenly spaced x-samples spanning
    /// `[a, b]` inclusive at the configured density, and the function value
    /// at every sample. Non-finite values ride along for the plotting sink
    /// to clip; a degenerate range produces empty vectors. The grid is
    /// recomputed from scratch on every call.
    pub fn generate_points(&self) -> (DVector<f64>, DVector<f64>) {
        if !(self.range.b > self.range.a) {
            warn!(
                "degenerate sampling range [{}, {}], nothing to generate",
                self.range.a, self.range.b
            );
            return (DVector::from_vec(vec![]), DVector::from_vec(vec![]));
        }

        let steps = (self.range.width() * self.samples_per_unit).round() as usize;
        let x_values: Vec<f64> = (0..=steps)
            .map(|i| self.range.a + i as f64 / self.samples_per_unit)
            .collect();
        let y_values: Vec<f64> = x_values.iter().map(|&x| self.expression.evaluate(x)).collect();

        (DVector::from_vec(x_values), DVector::from_vec(y_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::expression_engine::{BinaryOp, Member};

    #[test]
    fn test_points_have_equal_length_and_stay_in_range() {
        let function = PlotFunction::from_input("x", SamplingRange::new(-2.0, 2.0));
        let (x_values, y_values) = function.generate_points();
        assert_eq!(x_values.len(), y_values.len());
        assert_eq!(x_values.len(), 4001);
        assert!(x_values.iter().all(|&x| (-2.0..=2.0).contains(&x)));
    }

    #[test]
    fn test_every_sample_matches_direct_evaluation() {
        let function = PlotFunction::from_input("3x^2+4", SamplingRange::new(-1.0, 1.0));
        let (x_values, y_values) = function.generate_points();
        for i in 0..x_values.len() {
            assert_eq!(y_values[i], function.evaluate(x_values[i]));
        }
    }

    #[test]
    fn test_division_by_zero_does_not_halt_generation() {
        // 1/x over a range crossing zero
        let expression = Expression::from_terms(vec![
            Member::Number(1.0),
            Member::Term(crate::expression::expression_engine::Term::new(1.0, 1.0)),
        ])
        .with_operator(BinaryOp::Div);
        let function = PlotFunction::new(expression, SamplingRange::new(-1.0, 1.0));
        let (x_values, y_values) = function.generate_points();
        assert_eq!(x_values.len(), y_values.len());
        assert!(y_values.iter().any(|y| !y.is_finite()));
        assert!(y_values.iter().filter(|y| y.is_finite()).count() > 0);
    }

    #[test]
    fn test_degenerate_range_is_empty() {
        let function = PlotFunction::from_input("x", SamplingRange::new(2.0, 2.0));
        let (x_values, y_values) = function.generate_points();
        assert_eq!(x_values.len(), 0);
        assert_eq!(y_values.len(), 0);
    }

    #[test]
    fn test_custom_density() {
        let function = PlotFunction::with_density(
            Expression::parse_expression("x"),
            SamplingRange::new(0.0, 1.0),
            10.0,
        );
        let (x_values, _) = function.generate_points();
        assert_eq!(x_values.len(), 11);
        assert_eq!(x_values[10], 1.0);
    }

    #[test]
    fn test_malformed_input_plots_flat_zero() {
        let function = PlotFunction::from_input("3x#2", SamplingRange::new(0.0, 1.0));
        let (_, y_values) = function.generate_points();
        assert!(y_values.iter().all(|&y| y == 0.0));
    }
}
