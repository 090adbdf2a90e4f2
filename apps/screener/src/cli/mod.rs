//! Command-line front end. Each command drives one controller operation and
//! prints the same status text a form-based client would show.

pub mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::contact::{contact_status, send_contact};
use crate::models::{CandidateId, ContactMessage, ResumeFile, SubmissionInput};
use crate::roster::{AssumeYes, ConfirmPrompt, RosterOutcome, TerminalPrompt};
use crate::state::AppState;
use crate::submission::controller::SAMPLE_JOB_DESCRIPTION;
use crate::submission::SubmitOutcome;

#[derive(Parser, Debug)]
#[command(
    name = "screener",
    about = "Submit resumes for screening and manage the candidate roster",
    version
)]
pub struct Cli {
    /// Override SCREENER_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Override SCREENER_DOWNLOAD_DIR
    #[arg(long, global = true)]
    pub download_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(dir) = &self.download_dir {
            config.download_dir = dir.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a resume against a job description
    Analyze(AnalyzeArgs),
    /// List stored candidates, highest final score first
    Candidates,
    /// Show one candidate's profile
    Show { id: String },
    /// Delete one candidate
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete every stored candidate
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the roster to candidates.csv in the download directory
    ExportCsv,
    /// Download the PDF report for a stored candidate
    ExportPdf { id: String },
    /// Send a message to the site owners
    Contact(ContactArgs),
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Job description text
    #[arg(long, conflicts_with_all = ["job_description_file", "sample_job_description"])]
    pub job_description: Option<String>,
    /// Read the job description from a file
    #[arg(long, conflicts_with = "sample_job_description")]
    pub job_description_file: Option<PathBuf>,
    /// Use the built-in sample job description
    #[arg(long)]
    pub sample_job_description: bool,
    /// Resume file (PDF or DOCX)
    #[arg(long)]
    pub resume: Option<PathBuf>,
    /// Also download the PDF report when the analysis succeeds
    #[arg(long)]
    pub export_pdf: bool,
}

#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

pub async fn run(command: Command, state: &AppState) -> Result<ExitCode> {
    Ok(if execute(command, state).await? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one command; `Ok(false)` means it ran but the operation failed and
/// the reason has already been printed.
async fn execute(command: Command, state: &AppState) -> Result<bool> {
    match command {
        Command::Analyze(args) => analyze(args, state).await,
        Command::Candidates => {
            if !load_roster(state).await {
                return Ok(false);
            }
            print!("{}", render::render_roster(&state.roster.display()));
            Ok(true)
        }
        Command::Show { id } => {
            if !load_roster(state).await {
                return Ok(false);
            }
            let id = parse_id(&id);
            if !state.roster.select(&id) {
                eprintln!("No candidate with id {id}.");
                return Ok(false);
            }
            if let Some(candidate) = state.roster.selected() {
                print!("{}", render::render_candidate(&candidate));
            }
            state.roster.close_selection();
            Ok(true)
        }
        Command::Delete { id, yes } => {
            if !load_roster(state).await {
                return Ok(false);
            }
            let prompt = prompt_for(yes);
            let outcome = state.roster.delete_one(&parse_id(&id), prompt).await;
            Ok(report_mutation(outcome, "Candidate deleted.", state))
        }
        Command::Clear { yes } => {
            let prompt = prompt_for(yes);
            let outcome = state.roster.clear_all(prompt).await;
            Ok(report_mutation(outcome, "All candidates deleted.", state))
        }
        Command::ExportCsv => {
            if !load_roster(state).await {
                return Ok(false);
            }
            // CSV rows follow fetch order, not the sorted display order.
            match state.exports.export_csv(&state.roster.candidates()).await {
                Ok(saved) => {
                    println!("Saved {}", saved.location.display());
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    Ok(false)
                }
            }
        }
        Command::ExportPdf { id } => {
            if !load_roster(state).await {
                return Ok(false);
            }
            let id = parse_id(&id);
            let Some(candidate) = state.roster.candidates().into_iter().find(|c| c.id == id) else {
                eprintln!("No candidate with id {id}.");
                return Ok(false);
            };
            match state.exports.export_pdf(candidate).await {
                Ok(saved) => {
                    println!("Saved {}", saved.location.display());
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    Ok(false)
                }
            }
        }
        Command::Contact(args) => {
            let message = ContactMessage {
                name: args.name,
                email: args.email,
                message: args.message,
            };
            let outcome = send_contact(state.backend.as_ref(), &message).await;
            let status = contact_status(&outcome);
            if outcome.is_ok() {
                println!("{status}");
                Ok(true)
            } else {
                eprintln!("{status}");
                Ok(false)
            }
        }
    }
}

async fn analyze(args: AnalyzeArgs, state: &AppState) -> Result<bool> {
    let input = build_input(&args).await?;
    debug!("Submitting analysis for {:?}", input.name);

    match state.submission.submit(input).await {
        SubmitOutcome::Succeeded(result) => {
            print!("{}", render::render_result(&result));
            if args.export_pdf {
                match state.exports.export_pdf(result).await {
                    Ok(saved) => println!("Saved {}", saved.location.display()),
                    Err(e) => {
                        eprintln!("{}", e.user_message());
                        return Ok(false);
                    }
                }
            }
            Ok(true)
        }
        SubmitOutcome::Failed(_) => {
            if let Some(status) = state.submission.status_message() {
                eprintln!("{status}");
            }
            Ok(false)
        }
        SubmitOutcome::Refused | SubmitOutcome::Stale | SubmitOutcome::Cancelled => {
            eprintln!("The analysis did not complete.");
            Ok(false)
        }
    }
}

/// Assembles the form from flags. Missing values stay blank so validation
/// reports them together.
async fn build_input(args: &AnalyzeArgs) -> Result<SubmissionInput> {
    let job_description = if args.sample_job_description {
        SAMPLE_JOB_DESCRIPTION.to_string()
    } else if let Some(path) = &args.job_description_file {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading job description from {}", path.display()))?
    } else {
        args.job_description.clone().unwrap_or_default()
    };

    let resume_file = match &args.resume {
        Some(path) => Some(
            ResumeFile::from_path(path)
                .await
                .with_context(|| format!("reading resume from {}", path.display()))?,
        ),
        None => None,
    };

    Ok(SubmissionInput {
        name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        job_description,
        resume_file,
    })
}

async fn load_roster(state: &AppState) -> bool {
    match state.roster.load().await {
        RosterOutcome::Applied => true,
        _ => {
            if let Some(error) = state.roster.error() {
                eprintln!("{error}");
            }
            false
        }
    }
}

fn prompt_for(yes: bool) -> &'static dyn ConfirmPrompt {
    if yes {
        &AssumeYes
    } else {
        &TerminalPrompt
    }
}

fn parse_id(raw: &str) -> CandidateId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

fn report_mutation(outcome: RosterOutcome, done: &str, state: &AppState) -> bool {
    match outcome {
        RosterOutcome::Applied => {
            println!("{done}");
            true
        }
        RosterOutcome::Declined => {
            println!("Cancelled.");
            true
        }
        RosterOutcome::Busy => {
            eprintln!("Another roster operation is still running.");
            false
        }
        RosterOutcome::Failed(_) => {
            if let Some(error) = state.roster.error() {
                eprintln!("{error}");
            }
            false
        }
    }
}
