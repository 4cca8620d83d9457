/////////////////////////////TESTS////////////////////////////////////////////////////
/*
coverage:
Title and key parsing
Value list parsing
Full document parsing
Missing and malformed keys
Comment filtering
Building a plot function from a task
*/

#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::{
        PlotTask, filter_comments, parse_key, parse_key_value_pair, parse_plot_task, parse_title,
        parse_value_list,
    };

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("plot\nexpression: x").unwrap();
        assert_eq!(title, "plot");
        assert_eq!(remaining, "expression: x");
    }

    #[test]
    fn test_parse_key() {
        let (remaining, key) = parse_key("samples_per_unit: 500").unwrap();
        assert_eq!(key, "samples_per_unit");
        assert_eq!(remaining, ": 500");
    }

    #[test]
    fn test_parse_value_list() {
        let (_, values) = parse_value_list("-2, 2").unwrap();
        assert_eq!(values, vec!["-2".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_parse_key_value_pair_keeps_expression_whole() {
        let (_, (key, values)) = parse_key_value_pair("expression: 3sin(2x+4)+5").unwrap();
        assert_eq!(key, "expression");
        assert_eq!(values, vec!["3sin(2x+4)+5".to_string()]);
    }

    #[test]
    fn test_parse_full_document() {
        let document = "plot\nexpression: 3x^2+4\nrange: -2, 2\nsamples_per_unit: 500";
        let task = parse_plot_task(document).unwrap();
        assert_eq!(
            task,
            PlotTask {
                expression: "3x^2+4".to_string(),
                range: (-2.0, 2.0),
                samples_per_unit: Some(500.0),
            }
        );
    }

    #[test]
    fn test_density_is_optional() {
        let document = "plot\nexpression: x\nrange: 0, 1";
        let task = parse_plot_task(document).unwrap();
        assert_eq!(task.samples_per_unit, None);
    }

    #[test]
    fn test_missing_expression_is_an_error() {
        let document = "plot\nrange: 0, 1";
        assert!(parse_plot_task(document).is_err());
    }

    #[test]
    fn test_one_bound_range_is_an_error() {
        let document = "plot\nexpression: x\nrange: 0";
        assert!(parse_plot_task(document).is_err());
    }

    #[test]
    fn test_non_numeric_bound_is_an_error() {
        let document = "plot\nexpression: x\nrange: zero, 1";
        assert!(parse_plot_task(document).is_err());
    }

    #[test]
    fn test_wrong_title_is_an_error() {
        let document = "table\nexpression: x\nrange: 0, 1";
        assert!(parse_plot_task(document).is_err());
    }

    #[test]
    fn test_comments_are_filtered() {
        let document = "// task written by the front-end\nplot\n# density left at default\nexpression: x\nrange: 0, 1";
        let task = parse_plot_task(document).unwrap();
        assert_eq!(task.expression, "x");
        assert_eq!(filter_comments("// only a comment"), "");
    }

    #[test]
    fn test_task_builds_a_working_plot_function() {
        let document = "plot\nexpression: 2x^3\nrange: 0, 2\nsamples_per_unit: 10";
        let function = parse_plot_task(document).unwrap().build();
        assert_eq!(function.evaluate(2.0), 16.0);
        let (x_values, y_values) = function.generate_points();
        assert_eq!(x_values.len(), 21);
        assert_eq!(y_values[20], 16.0);
    }
}
