use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::infra::{
    InMemoryApplicationRepository, InMemoryCompanyStore, InMemoryJobStore, InMemoryPartnerStore,
    InMemoryUserStore, ServiceGateway,
};
use launchpad::applications::ApplicationService;
use launchpad::board::{
    ApplicationDraft, ApplicationStatus, BoardColumn, BoardStore, BoardSync, CardMove, Notifier,
    Severity,
};
use launchpad::catalog::{CatalogService, JobDraft, JobFilter};
use launchpad::error::AppError;
use launchpad::roster::RosterImporter;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User id the demo board belongs to
    #[arg(long, default_value = "demo-applicant")]
    pub(crate) user: String,
}

#[derive(Args, Debug)]
pub(crate) struct RosterImportArgs {
    /// Path to the roster CSV export
    pub(crate) path: PathBuf,
}

/// Toast analog for the terminal.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Info => "info",
            Severity::Error => "error",
        };
        println!("  [toast:{tag}] {message}");
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let user = args.user;
    println!("Launchpad pipeline demo (user: {user})");

    let job_store = Arc::new(InMemoryJobStore::default());
    let catalog = CatalogService::new(
        job_store.clone(),
        Arc::new(InMemoryPartnerStore::default()),
        Arc::new(InMemoryCompanyStore::default()),
    );

    let backend = catalog.create_job(JobDraft {
        title: "Backend Engineer".to_string(),
        company: "Initech".to_string(),
        location: Some("Remote".to_string()),
        description: "Own the billing services.".to_string(),
        tags: vec!["rust".to_string(), "backend".to_string()],
        active: true,
    })?;
    let frontend = catalog.create_job(JobDraft {
        title: "Frontend Engineer".to_string(),
        company: "Acme".to_string(),
        location: Some("Denver, CO".to_string()),
        description: "Build the customer dashboard.".to_string(),
        tags: vec!["react".to_string()],
        active: true,
    })?;
    println!(
        "Seeded {} catalog jobs",
        catalog.list_jobs(&JobFilter::default())?.len()
    );

    let service = Arc::new(ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        job_store,
    ));
    let mut sync = BoardSync::new(
        BoardStore::new(),
        Arc::new(ServiceGateway::new(service)),
        Arc::new(StdoutNotifier),
    );

    let tracked = sync
        .add_card(ApplicationDraft {
            user_id: user.clone(),
            job_id: backend.id.clone(),
            status: ApplicationStatus::Interested,
            resume_id: None,
            position: Some("Backend Engineer".to_string()),
        })
        .await?;
    sync.add_card(ApplicationDraft {
        user_id: user.clone(),
        job_id: frontend.id.clone(),
        status: ApplicationStatus::Interested,
        resume_id: None,
        position: None,
    })
    .await?;

    println!("\nBoard after tracking two jobs:");
    render_board(&sync);

    println!("\nAttempting to track {} a second time:", backend.id);
    if sync
        .add_card(ApplicationDraft {
            user_id: user.clone(),
            job_id: backend.id.clone(),
            status: ApplicationStatus::Interested,
            resume_id: None,
            position: None,
        })
        .await
        .is_err()
    {
        println!("  (rejected, board unchanged)");
    }

    for (column, group) in [
        (BoardColumn::Applied, None),
        (BoardColumn::Interview, Some("phone_screening")),
        (BoardColumn::Interview, Some("final_interview_stage")),
        (BoardColumn::Offer, Some("offer_extended")),
        (BoardColumn::Accepted, None),
    ] {
        sync.move_card(CardMove {
            application_id: tracked.clone(),
            to: column,
            group: group.map(str::to_string),
        })
        .await?;
    }
    sync.edit_notes(&tracked, &user, "Signed the offer. Start date in three weeks.")
        .await?;

    println!("\nBoard after walking {} to accepted:", backend.id);
    render_board(&sync);

    sync.set_archived(&tracked, true).await?;
    let archived = sync.store().archived();
    println!(
        "\nArchived view: {} accepted, {} rejected",
        archived.accepted.len(),
        archived.rejected.len()
    );

    sync.set_archived(&tracked, false).await?;
    println!("Restored {} back to the accepted column", tracked);

    Ok(())
}

fn render_board<G, N>(sync: &BoardSync<G, N>)
where
    G: launchpad::board::ApplicationGateway,
    N: Notifier,
{
    for column in &sync.store().board().columns {
        if column.card_count() == 0 {
            continue;
        }
        println!("- {} ({})", column.label, column.card_count());
        for card in &column.cards {
            println!("    {} [{}]", card.job_id, card.status.label());
        }
        for group in &column.groups {
            for card in &group.cards {
                println!("    {} [{} / {}]", card.job_id, card.status.label(), group.label);
            }
        }
    }
}

pub(crate) fn run_roster_import(args: RosterImportArgs) -> Result<(), AppError> {
    let store = InMemoryUserStore::default();
    let outcome = RosterImporter::from_path(&args.path, &store)?;

    println!(
        "Imported {} users, skipped {} rows",
        outcome.imported_count(),
        outcome.skipped_count()
    );
    for user in &outcome.imported {
        println!(
            "+ {} {} <{}> ({})",
            user.first_name,
            user.last_name,
            user.email,
            user.role.label()
        );
    }
    for row in &outcome.skipped {
        println!("! line {}: {}", row.line, row.reason);
    }

    Ok(())
}
