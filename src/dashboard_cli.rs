// src/dashboard_cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app_log;
use crate::core::ConfigManager;
use crate::lfd::export::write_csv;
use crate::lfd::{ListView, RecordId, RecordKind};
use crate::types::{Application, Candidate, Job};
use crate::utils::render_table;
use crate::workspace::{Screened, Workspace};

#[derive(Parser)]
#[command(name = "recruitai")]
#[command(about = "Browse and export RecruitAI dashboard records")]
pub struct DashboardCli {
    #[command(subcommand)]
    pub command: DashboardCommand,
}

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// List applications received for one job posting
    Applications {
        #[arg(long, default_value = "1")]
        job: String,
        #[arg(long)]
        query: Option<String>,
        /// all, pending, qualified or not_qualified
        #[arg(long)]
        status: Option<String>,
    },
    /// List shortlisted candidates
    Candidates {
        #[arg(long)]
        query: Option<String>,
    },
    /// List job postings (open ones unless --status says otherwise)
    Jobs {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Write the filtered list of a screen as CSV
    Export {
        screen: RecordKind,
        /// Job whose applications to export
        #[arg(long, default_value = "1")]
        job: String,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show plan usage and recent activity
    Usage,
    /// Compare subscription plans
    Plans,
    /// Headline numbers and recent jobs
    Dashboard,
}

pub async fn handle_dashboard_command(cli: DashboardCli) -> Result<()> {
    let config = ConfigManager::load()?;
    let workspace = Workspace::load(config.build_api()?, config.build_link_sharer())
        .await
        .context("Failed to load dashboard records")?;

    match cli.command {
        DashboardCommand::Applications { job, query, status } => {
            let scope = RecordId::from(job);
            let view = workspace
                .list::<Application>(Some(&scope), query.as_deref(), status.as_deref())
                .await?;
            println!("{}", format_list(&view));
        }

        DashboardCommand::Candidates { query } => {
            let view = workspace
                .list::<Candidate>(None, query.as_deref(), None)
                .await?;
            println!("{}", format_list(&view));
        }

        DashboardCommand::Jobs { query, status } => {
            let view = workspace
                .list::<Job>(None, query.as_deref(), status.as_deref())
                .await?;
            println!("{}", format_list(&view));
        }

        DashboardCommand::Export {
            screen,
            job,
            query,
            status,
            out,
        } => {
            let scope = RecordId::from(job);
            let count = match screen {
                RecordKind::Application => {
                    export::<Application>(&workspace, Some(&scope), query, status, out.as_ref())
                        .await?
                }
                RecordKind::Candidate => {
                    export::<Candidate>(&workspace, None, query, None, out.as_ref()).await?
                }
                RecordKind::Job => {
                    export::<Job>(&workspace, None, query, status, out.as_ref()).await?
                }
            };
            if let Some(path) = &out {
                eprintln!("Exported {} {} to {}", count, screen.plural(), path.display());
            }
        }

        DashboardCommand::Usage => {
            let report = workspace.usage_report().await?;
            println!("{} plan, renews {}\n", report.plan.name, report.plan.renews_on);

            let metrics: Vec<Vec<String>> = report
                .metrics
                .iter()
                .map(|m| {
                    vec![
                        m.label.clone(),
                        format!("{} / {} {}", m.value, m.limit, m.unit),
                        format!("{}%", m.percentage),
                    ]
                })
                .collect();
            println!("{}\n", render_table(&["Metric", "Used", "Percent"], &metrics));

            let activity: Vec<Vec<String>> = report
                .activity
                .iter()
                .map(|a| vec![a.date.clone(), a.action.clone(), a.details.clone(), a.cost.clone()])
                .collect();
            println!(
                "{}",
                render_table(&["Date", "Action", "Details", "Cost"], &activity)
            );
        }

        DashboardCommand::Plans => {
            let rows: Vec<Vec<String>> = workspace
                .plans()
                .await
                .iter()
                .map(|view| {
                    vec![
                        format!(
                            "{}{}",
                            view.plan.name,
                            if view.is_current { " (current)" } else { "" }
                        ),
                        format!("${}/mo", view.plan.monthly_price),
                        format!("${}/yr", view.plan.yearly_price),
                        if view.savings.amount > 0 {
                            format!("save ${} ({}%)", view.savings.amount, view.savings.percent)
                        } else {
                            String::new()
                        },
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(&["Plan", "Monthly", "Yearly", "Savings"], &rows)
            );
        }

        DashboardCommand::Dashboard => {
            let summary = workspace.dashboard().await;
            println!("Active jobs:            {}", summary.active_jobs);
            println!("Total applications:     {}", summary.total_applications);
            println!("Shortlisted candidates: {}\n", summary.shortlisted_candidates);

            let rows: Vec<Vec<String>> = summary
                .recent_jobs
                .iter()
                .map(|job| {
                    vec![
                        job.title.clone(),
                        job.applications.to_string(),
                        job.status.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(&["Recent job", "Applications", "Status"], &rows)
            );
        }
    }

    Ok(())
}

/// The list as a table, or the screen's empty-state message.
pub fn format_list<R: Screened>(view: &ListView<R>) -> String {
    if let Some(message) = view.empty_message {
        return message.to_string();
    }

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.id.to_string()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    let mut headers = vec!["ID"];
    headers.extend(view.headers.iter().copied());

    let tabs: Vec<String> = view
        .tabs
        .iter()
        .map(|tab| format!("{} ({})", tab.label, tab.count))
        .collect();

    format!(
        "{}\n\n{} of {} shown | {}",
        render_table(&headers, &rows),
        view.rows.len(),
        view.total,
        tabs.join("  ")
    )
}

async fn export<R: Screened>(
    workspace: &Workspace,
    scope: Option<&RecordId>,
    query: Option<String>,
    status: Option<String>,
    out: Option<&PathBuf>,
) -> Result<usize> {
    let records = workspace
        .list::<R>(scope, query.as_deref(), status.as_deref())
        .await?
        .records();

    match out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&records, file)?;
        }
        None => write_csv(&records, std::io::stdout().lock())?,
    }

    app_log!(info, "Exported {} {}", records.len(), R::KIND.plural());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LinkSharer, MemoryClipboard, MockRecordApi};
    use std::sync::Arc;

    async fn workspace() -> Workspace {
        let links = LinkSharer::new("http://localhost:3000", Box::new(MemoryClipboard::default()));
        Workspace::load(Arc::new(MockRecordApi::builtin()), links)
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_export_command() {
        let cli = DashboardCli::try_parse_from([
            "recruitai", "export", "applications", "--status", "qualified", "--out", "out.csv",
        ])
        .unwrap();
        match cli.command {
            DashboardCommand::Export { screen, job, status, .. } => {
                assert_eq!(screen, RecordKind::Application);
                assert_eq!(job, "1");
                assert_eq!(status.as_deref(), Some("qualified"));
            }
            _ => panic!("expected export"),
        }

        assert!(DashboardCli::try_parse_from(["recruitai", "export", "offers"]).is_err());
    }

    #[tokio::test]
    async fn test_format_list_and_empty_state() {
        let ws = workspace().await;
        let view = ws.list::<Candidate>(None, None, None).await.unwrap();
        let text = format_list(&view);
        assert!(text.contains("Alex Kumar"));
        assert!(text.contains("4 of 4 shown"));

        let view = ws.list::<Candidate>(None, Some("nobody"), None).await.unwrap();
        assert_eq!(format_list(&view), view.empty_message.unwrap());
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let ws = workspace().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applications.csv");

        let count = export::<Application>(
            &ws,
            Some(&RecordId::from("1")),
            None,
            Some("qualified".to_string()),
            Some(&path),
        )
        .await
        .unwrap();

        assert_eq!(count, 2);
        let csv = std::fs::read_to_string(&path).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
