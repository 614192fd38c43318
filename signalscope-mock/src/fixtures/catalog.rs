use super::points::SYMBOLS;

// Unsorted and with a duplicate; the orchestrator normalizes listings.
pub const MODELS: [&str; 3] = ["xgb-v1", "lstm-v2", "xgb-v1"];

pub fn symbols() -> Vec<String> {
    SYMBOLS.iter().map(ToString::to_string).collect()
}

pub fn models() -> Vec<String> {
    MODELS.iter().map(ToString::to_string).collect()
}
