/// examples of parsing expressions, evaluating them and generating plot data
pub mod plotting_examples;
