//! Model catalog offered by the settings surface.

pub const DEFAULT_MODEL: &str = "llama-3.1-sonar-small-128k-online";

pub const AVAILABLE_MODELS: [&str; 6] = [
    "llama-3.1-sonar-small-128k-chat",
    "llama-3.1-sonar-small-128k-online",
    "llama-3.1-sonar-large-128k-chat",
    "llama-3.1-sonar-large-128k-online",
    "llama-3.1-8b-instruct",
    "llama-3.1-70b-instruct",
];

/// Reports whether `name` is one of the catalog entries.
///
/// The store never enforces membership; this is for presentation layers that offer a
/// fixed list.
pub fn is_known_model(name: &str) -> bool {
    AVAILABLE_MODELS.contains(&name)
}
