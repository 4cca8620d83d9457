#![allow(non_snake_case)]
use RustedGrapher::Examples::plotting_examples::plotting_examples;
use RustedGrapher::Utils::logger::init_console_logger;
use simplelog::LevelFilter;

fn main() {
    init_console_logger(LevelFilter::Info);
    let example = 0;
    plotting_examples(example);
}
