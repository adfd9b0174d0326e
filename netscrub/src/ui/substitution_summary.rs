// netscrub/src/ui/substitution_summary.rs
//! Renders the end-of-run substitution summary.

use netscrub_core::ledger::plural_time;
use netscrub_core::Ledger;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::output_format::print_styled;
use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Prints the "Substitutions made:" header and one aligned line per ledger entry.
///
/// Without colors the lines are exactly the ledger's `Display` output.
pub fn print_summary<W: Write>(
    ledger: &Ledger,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, "Substitutions made:", ThemeEntry::Header, theme, enable_colors)?;
    if !enable_colors {
        return write!(writer, "{}", ledger);
    }

    let original_width = ledger.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let replacement_width = ledger.iter().map(|(_, e)| e.replacement.chars().count()).max().unwrap_or(0);
    for (original, entry) in ledger.iter() {
        // Pad before coloring so escape codes do not count toward the width.
        let original = format!("{:<w$}", original, w = original_width);
        let replacement = format!("{:<w$}", entry.replacement, w = replacement_width);
        let occurrences = format!("({} {})", entry.count, plural_time(entry.count));
        writeln!(
            writer,
            "{} -> {} {}",
            original.color(color_for(ThemeEntry::SummaryOriginal, theme)),
            replacement.color(color_for(ThemeEntry::SummaryReplacement, theme)),
            occurrences.color(color_for(ThemeEntry::SummaryOccurrences, theme)),
        )?;
    }
    Ok(())
}
