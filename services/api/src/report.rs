use clap::Args;
use rail_audit::audits::{Audit, Platform, Scored, SubSection};
use rail_audit::error::{AppError, DataLoadError};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Audit document (JSON) to score
    #[arg(long)]
    pub(crate) audit: PathBuf,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let file = std::fs::File::open(&args.audit)?;
    let mut audit: Audit = serde_json::from_reader(file).map_err(DataLoadError::from)?;
    audit.annotate_scores();
    print!("{}", render_score_report(&audit));
    Ok(())
}

pub(crate) fn render_score_report(audit: &Audit) -> String {
    let mut out = format!("Audit {}\n", audit.id);
    if let Some(username) = &audit.username {
        out.push_str(&format!("Filed by: {username}\n"));
    }
    out.push_str(&format!(
        "Completed: {}\n",
        audit.complete_time.as_deref().unwrap_or("in progress")
    ));
    if let (Some(from), Some(to)) = (&audit.departure_station, &audit.arrival_station) {
        out.push_str(&format!("Route: {from} -> {to}\n"));
    }

    if audit.sections.is_empty() {
        out.push_str("\nNo sections recorded\n");
        return out;
    }

    for section in &audit.sections {
        let score = section.score.unwrap_or_else(|| section.score());
        out.push_str(&format!(
            "\n{}: {}\n",
            section.title.as_deref().unwrap_or("Untitled section"),
            score
        ));
        for sub in &section.sub_sections {
            out.push_str(&sub_section_line(sub, "  "));
        }
        for platform in &section.platforms {
            out.push_str(&platform_lines(platform));
        }
    }
    out
}

fn platform_lines(platform: &Platform) -> String {
    let score = platform.score.unwrap_or_else(|| platform.score());
    let mut lines = format!(
        "  Platform {}: {}\n",
        platform.platform.as_deref().unwrap_or("?"),
        score
    );
    for sub in &platform.sub_sections {
        lines.push_str(&sub_section_line(sub, "    "));
    }
    lines
}

fn sub_section_line(sub: &SubSection, indent: &str) -> String {
    let score = sub.score.unwrap_or_else(|| sub.score());
    format!(
        "{indent}- {}: {}/{}\n",
        sub.title.as_deref().unwrap_or("Untitled"),
        score,
        sub.answers.len()
    )
}
