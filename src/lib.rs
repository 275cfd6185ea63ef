// Library surface for the terminal front end and headless integration tests.
pub mod command;
pub mod compare;
pub mod config;
pub mod controller;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod samples;
pub mod session;
pub mod test_run;
pub mod tokenize;
