//! Integration tests for wotc-bot.

pub mod clan_test;
pub mod cycle_test;
pub mod extract_test;
pub mod router_test;

/// Reads a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}
