// netscrub/src/ui/theme.rs
//! Colors for the status lines and the substitution summary.

use owo_colors::AnsiColors;
use std::collections::HashMap;

/// Type alias for the theme map.
pub type ThemeMap = HashMap<ThemeEntry, AnsiColors>;

/// The logical parts of the output that get a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Original values in the summary.
    SummaryOriginal,
    /// Replacement values in the summary.
    SummaryReplacement,
    SummaryOccurrences,
}

/// Returns the default color for every entry.
pub fn default_theme_map() -> ThemeMap {
    HashMap::from([
        (ThemeEntry::Header, AnsiColors::BrightWhite),
        (ThemeEntry::Success, AnsiColors::Green),
        (ThemeEntry::Info, AnsiColors::Cyan),
        (ThemeEntry::Warn, AnsiColors::Yellow),
        (ThemeEntry::Error, AnsiColors::Red),
        (ThemeEntry::SummaryOriginal, AnsiColors::Magenta),
        (ThemeEntry::SummaryReplacement, AnsiColors::Green),
        (ThemeEntry::SummaryOccurrences, AnsiColors::BrightBlack),
    ])
}

/// Looks up `entry`, falling back to white for entries a custom map left out.
pub fn color_for(entry: ThemeEntry, theme: &ThemeMap) -> AnsiColors {
    theme.get(&entry).copied().unwrap_or(AnsiColors::White)
}
