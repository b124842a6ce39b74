use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("Failed to read {CONFIG_PATH}: {e}"));

    // The embedded rule set must at least parse and name a rule order
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid {CONFIG_PATH}: {e}"),
    };

    let has_order = table
        .get("rules")
        .and_then(|rules| rules.get("order"))
        .is_some_and(|order| order.is_array());
    if !has_order {
        panic!("{CONFIG_PATH} must define [rules] order as an array");
    }
}
