// netscrub/src/ui/output_format.rs
//! Status line printing with optional colors.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes `text` followed by a newline, colored for `entry` when `enable_colors` is set.
pub fn print_styled<W: Write>(
    writer: &mut W,
    text: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", text.color(color_for(entry, theme)))
    } else {
        writeln!(writer, "{}", text)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_styled(writer, msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_styled(writer, msg, ThemeEntry::Success, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_styled(writer, &format!("Warning: {}", msg), ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_styled(writer, &format!("Error: {}", msg), ThemeEntry::Error, theme, enable_colors)
}
