mod assemble_tests;
mod common;
mod pipeline_tests;
