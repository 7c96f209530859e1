//! CLI subcommand implementations.

pub mod check;
pub mod day;
pub mod export;
pub mod name;
pub mod places;
pub mod render;
pub mod spans;
pub mod tagged;
pub mod total;
pub mod util;
pub mod where_at;
