//! GitHub-style language colors

/// Shared color for languages missing from the table
pub const DEFAULT_COLOR: &str = "#858585";

/// Well-known language colors, matching GitHub's linguist palette
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Rust", "#dea584"),
    ("Scala", "#c22d40"),
    ("Shell", "#89e051"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("SCSS", "#c6538c"),
    ("Vue", "#41b883"),
    ("Dart", "#00B4AB"),
    ("R", "#198CE7"),
    ("Objective-C", "#438eff"),
    ("Perl", "#0298c3"),
    ("Lua", "#000080"),
    ("Haskell", "#5e5086"),
    ("Elixir", "#6e4a7e"),
    ("Clojure", "#db5855"),
    ("Julia", "#a270ba"),
    ("MATLAB", "#e16737"),
    ("Groovy", "#e69f56"),
    ("PowerShell", "#012456"),
    ("WebAssembly", "#04133b"),
];

/// Color for a language name, falling back to [`DEFAULT_COLOR`]
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(DEFAULT_COLOR, |(_, color)| color)
}
