//! CLI domain: parse, route, output, and presentation only.
//! No hashing logic; the route table dispatches to the digest engine.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, HashArgs};
pub use presentation::{
    format_algorithms_json, format_algorithms_text, format_digest_json, format_digest_text,
};
pub use route::RunContext;
