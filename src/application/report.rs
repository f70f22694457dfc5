use colored::{ColoredString, Colorize};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{ResolutionOutcome, ResolvedFile};

fn outcome_label(outcome: ResolutionOutcome) -> ColoredString {
    let label = format!("{:>10}", outcome.to_string());
    match outcome {
        ResolutionOutcome::Created => label.green(),
        ResolutionOutcome::Updated => label.yellow(),
        ResolutionOutcome::UpToDate => label.dimmed(),
    }
}

pub fn summary_line(file: &ResolvedFile) -> String {
    format!(
        "{} {} ({} bytes)",
        outcome_label(file.outcome),
        file.path.best_effort_path_display(),
        file.size
    )
}

pub fn print_summary(files: &[ResolvedFile]) {
    for file in files {
        println!("{}", summary_line(file));
    }
}
