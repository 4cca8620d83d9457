use crate::Utils::points_io::{save_points_to_csv, save_points_to_file};
use crate::Utils::task_parser::parse_plot_task;
use crate::expression::expression_engine::{BinaryOp, Expression, FunctionOperation, Member, Term};
use crate::expression::plot_function::{PlotFunction, SamplingRange};
use crate::expression::tokenizer::tokenize;

pub fn plotting_examples(example: usize) {
    match example {
        0 => {
            // tokenize and parse an expression typed by a user
            let input = "3sin(2x+4)+(1/2)e^(-x^2)+5";
            let tokens = tokenize(input);
            for token in &tokens {
                println!("{} '{}'", token.kind, token.text);
            }
            let parsed_expression = Expression::parse_expression(input);
            println!(" parsed_expression {}", parsed_expression);
            // evaluate at a few sample points
            for x in [-1.0, 0.0, 1.0] {
                println!("f({}) = {}", x, parsed_expression.evaluate(x));
            }
        }
        1 => {
            // generate the full point grid for a plotting front-end
            let function =
                PlotFunction::from_input("3x^2+4", SamplingRange::new(-2.0, 2.0));
            let (x_values, y_values) = function.generate_points();
            println!(
                "generated {} points, first ({}, {}), last ({}, {})",
                x_values.len(),
                x_values[0],
                y_values[0],
                x_values[x_values.len() - 1],
                y_values[y_values.len() - 1]
            );
            // hand the sequences over as files
            save_points_to_file(&x_values, &y_values, "points.txt", "x", "y").unwrap();
            save_points_to_csv(&x_values, &y_values, "points.csv", "x", "y").unwrap();
        }
        2 => {
            // a task document as the front-end would send it
            let document = "plot\nexpression: (1/2)x^2\nrange: -3, 3\nsamples_per_unit: 100";
            match parse_plot_task(document) {
                Ok(task) => {
                    println!("parsed task {:?}", task);
                    let function = task.build();
                    let (x_values, y_values) = function.generate_points();
                    println!("{} samples over [{}, {}]", x_values.len(), function.range.a, function.range.b);
                    let _ = y_values;
                }
                Err(e) => println!("task rejected: {}", e),
            }
        }
        3 => {
            // the same tree the parser would build, constructed directly
            let expression = Expression::from_terms(vec![
                Member::Term(Term::new(1.0, 1.0)),
                Member::Number(2.0),
            ])
            .with_operator(BinaryOp::Div)
            .with_function_operation(FunctionOperation::Arctg);
            println!("arctg(x/2) at x = 2: {}", expression.evaluate(2.0));
        }
        _ => {
            println!("there is no example with number {}", example)
        }
    }
}
