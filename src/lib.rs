pub mod fetch;
pub mod output;
pub mod parser;
pub mod scoring;
