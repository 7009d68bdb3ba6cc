//! Result reporting shared by the commands.

use colored::Colorize;

use crate::installer::Outcome;

/// Print `outcome` to stdout unless `quiet`.
///
/// Changes are printed as they are. "Nothing to do" outcomes get a yellow
/// `note:` prefix, followed by `hint` on its own line when one is given.
pub fn report_outcome(outcome: &Outcome, hint: Option<&str>, quiet: bool) {
    if quiet {
        return;
    }

    if outcome.is_change() {
        println!("{outcome}");
        return;
    }

    println!("{} {}", "note:".yellow().bold(), outcome);
    if let Some(hint) = hint {
        println!("{} {}", "hint:".cyan(), hint);
    }
}
