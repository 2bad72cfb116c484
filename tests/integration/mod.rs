//! Integration tests for the directory digest engine

mod digest_determinism;
mod order_independence;
mod test_utils;
