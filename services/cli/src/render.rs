use bnb_audit::error::AppError;
use bnb_audit::pipeline::PipelineOutcome;
use std::fmt::Write as _;

/// Prints the run summary. In JSON mode stdout carries only the document and
/// truncation warnings go to stderr.
pub(crate) fn render_outcome(outcome: &PipelineOutcome, as_json: bool) -> Result<(), AppError> {
    if as_json {
        let json = render_json(outcome).map_err(AppError::Summary)?;
        println!("{json}");
        for warning in outcome.truncation_warnings() {
            eprintln!("{warning}");
        }
    } else {
        print!("{}", render_text(outcome));
    }
    Ok(())
}

fn render_json(outcome: &PipelineOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

fn render_text(outcome: &PipelineOutcome) -> String {
    let summary = &outcome.summary;
    let mut text = String::new();
    let _ = writeln!(text, "Short-term rental license reconciliation");
    let _ = writeln!(
        text,
        "Generated {} -> {}",
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        outcome.report_path.display()
    );
    let _ = writeln!(
        text,
        "- {} rental licenses, {} lodging business licenses",
        summary.rentals, summary.businesses
    );
    let _ = writeln!(
        text,
        "- {} report rows | {} rentals matched ({:.0}%) | {} unmatched",
        summary.rows,
        summary.matched_rentals,
        summary.match_rate() * 100.0,
        summary.unmatched_rentals
    );
    if summary.rentals_with_multiple_businesses > 0 {
        let _ = writeln!(
            text,
            "- {} rentals matched more than one business record",
            summary.rentals_with_multiple_businesses
        );
    }
    for warning in outcome.truncation_warnings() {
        let _ = writeln!(text, "{warning}");
    }
    text
}
