pub mod config;
pub mod render;
pub mod run;
pub mod session;
pub mod ui;

#[cfg(test)]
mod test_helpers;
