//! Report Output
//!
//! Renders a finished session's tally as text or JSON.

use std::fmt::Write;

use haunt_events::{ExitReason, Outcome, SessionReport};

/// Human-readable tally of a session
pub fn render_text(report: &SessionReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_text(&mut out, report);
    out
}

fn write_text(out: &mut String, report: &SessionReport) -> std::fmt::Result {
    writeln!(out, "All done! Let's tally the results...")?;
    writeln!(out, "=================================")?;
    writeln!(out, "Seed: {}", report.seed)?;
    writeln!(out)?;

    for hunter in &report.hunters {
        let fate = match hunter.exit {
            Some(ExitReason::Scared) => "was scared out of the house",
            Some(ExitReason::Bored) => "got bored and left the house",
            Some(ExitReason::Victory) => "identified the ghost",
            Some(ExitReason::Forced) | None => "stayed until the end",
        };
        let equipment = format!("[{}]", hunter.equipment);
        writeln!(
            out,
            "{:<12} {:<14} fear {:>3}  boredom {:>3}  {}",
            hunter.name, equipment, hunter.fear, hunter.boredom, fate
        )?;
    }
    if report.hunters_remaining == 0 {
        writeln!(out, "There are no hunters left in the house")?;
    } else {
        writeln!(out, "{} hunter(s) still in the house", report.hunters_remaining)?;
    }
    writeln!(out)?;

    writeln!(out, "The evidence collected is:")?;
    if report.evidence.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for kind in &report.evidence {
        writeln!(out, "  {}", kind)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "The ghost was a {} last seen in the {} (boredom {})",
        report.ghost.class, report.ghost.room, report.ghost.boredom
    )?;
    match report.outcome {
        Outcome::GhostWins => writeln!(out, "The ghost has won the game!")?,
        Outcome::HuntersWin { identified } => {
            writeln!(out, "The hunters have won the game!")?;
            writeln!(out, "Correctly identified the ghost type as {}!", identified)?;
        }
        Outcome::GhostBored => writeln!(out, "The ghost got bored and left")?,
    }
    writeln!(out, "{} events logged", report.event_count)?;
    Ok(())
}

/// Pretty-printed JSON form of the report
pub fn render_json(report: &SessionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
