//! Use cases orchestrating the council deliberation

pub mod generate_title;
pub mod run_council;
pub mod send_message;

#[cfg(test)]
pub(crate) mod testing;
