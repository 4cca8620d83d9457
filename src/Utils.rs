/// console logger setup (simplelog)
pub mod logger;
/// saving generated point sequences to tab-separated text and csv
pub mod points_io;
/// parser of plot task documents: expression, range and grid density
pub mod task_parser;

mod task_parser_tests;
