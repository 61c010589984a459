use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::infra::{reference_service, InMemoryFragmentStore};
use ladder::error::AppError;
use ladder::framework::{FragmentStore, Milestone, TrackId};
use ladder::roster::RosterImporter;

#[derive(Args, Debug)]
pub(crate) struct RosterReportArgs {
    /// Roster CSV export (columns: Name, optional Assessed At, one per track)
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_roster_report(args: RosterReportArgs) -> Result<(), AppError> {
    let importer = RosterImporter::with_reference_rules();
    let report = importer.import_path(&args.csv)?;

    println!("Roster standings ({} people)", report.entries.len());
    println!("{:<24} {:>8}  {:<24} share", "name", "points", "title");
    for entry in &report.entries {
        println!(
            "{:<24} {:>8.2}  {:<24} #{}",
            entry.name, entry.total_points, entry.title, entry.fragment
        );
        if let Some(assessed_on) = entry.assessed_on {
            println!("{:<24} assessed {}", "", assessed_on);
        }
    }

    Ok(())
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional share fragment to seed the session with
    #[arg(long)]
    pub(crate) fragment: Option<String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryFragmentStore::default());
    if let Some(fragment) = args.fragment {
        store.save(&fragment)?;
    }

    let mut service = reference_service(store.clone());

    println!("== session start ==");
    print_session(&service);

    service.set_name("Robin of Locksley");
    service.set_milestone(TrackId::Foundations, Milestone::clamped(4));
    service.set_milestone(TrackId::ProjectManagement, Milestone::clamped(3));
    service.set_milestone(TrackId::LeadershipInitiative, Milestone::clamped(2));
    service.shift_focus(1);
    service.shift_focused_milestone(1);

    println!("== after walkthrough ==");
    print_session(&service);

    let report = service.report();
    println!("== report ==");
    println!("total points: {:.2}", report.total_points);
    for entry in &report.category_points {
        println!("{:<12} {:>8.2}", entry.category_label, entry.points);
    }
    if let Some(next) = &report.next_title {
        println!("next title: {} ({:.2} points away)", next.name, next.points_needed);
    }

    println!("share fragment: #{}", store.fragment().unwrap_or_default());
    Ok(())
}

fn print_session(service: &ladder::framework::AssessmentService<InMemoryFragmentStore>) {
    let assessment = service.assessment();
    println!(
        "name: {:?}, title: {:?}, focus: {}",
        assessment.name,
        assessment.title,
        assessment.focused_track.label()
    );
    for (track, milestone) in assessment.milestones.iter() {
        if milestone.get() > 0 {
            println!("  {:<24} {}", track.label(), milestone);
        }
    }
    println!("eligible: {}", service.eligible_titles().join(", "));
}
