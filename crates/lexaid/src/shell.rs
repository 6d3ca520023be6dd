// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lexaid shell` command implementation.
//!
//! An interactive intake session: the user describes a problem, reads the
//! analysis, asks for advice and generates documents. One [`IssueWorkflow`]
//! backs the whole session and every line runs inside a session span.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use lexaid_client::HttpLegalService;
use lexaid_config::LexaidConfig;
use lexaid_core::{DocumentType, Identifier, IssueSubmission, LexaidError, Urgency, View};
use lexaid_workflow::IssueWorkflow;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{Instrument, debug, info, info_span};

use crate::render;

const HELP: &str = "\
commands:
  /submit                         describe a new legal issue
  /advice                         get advice for the current case
  /generate <template> [type]     generate a document from a template
  /documents                      list generated documents
  /download <n> <path>            save document n to a file
  /templates                      list document templates
  /resources [category]           list legal-aid resources
  /view <name>                    switch view
  /views                          show which views are available
  /reset                          discard the current case
  /health                         check the legal service
  /help                           show this help
  /quit                           leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Submit,
    Advice,
    Generate {
        template_id: Identifier,
        document_type: Option<DocumentType>,
    },
    Documents,
    Download {
        index: usize,
        path: PathBuf,
    },
    Templates,
    Resources(Option<String>),
    View(View),
    Views,
    Reset,
    Health,
    Help,
    Quit,
}

impl ShellCommand {
    /// Case operations record a user-facing message on remote failure.
    fn records_failure(&self) -> bool {
        matches!(
            self,
            ShellCommand::Submit | ShellCommand::Advice | ShellCommand::Generate { .. }
        )
    }
}

fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".into());
    };
    let args: Vec<&str> = parts.collect();

    let command = match (head, args.as_slice()) {
        ("/submit", []) => ShellCommand::Submit,
        ("/advice", []) => ShellCommand::Advice,
        ("/generate", [template]) => ShellCommand::Generate {
            template_id: Identifier::parse(template),
            document_type: None,
        },
        ("/generate", [template, kind]) => ShellCommand::Generate {
            template_id: Identifier::parse(template),
            document_type: Some(
                kind.parse()
                    .map_err(|_| format!("unknown document type `{kind}`"))?,
            ),
        },
        ("/generate", _) => return Err("usage: /generate <template> [type]".into()),
        ("/documents", []) => ShellCommand::Documents,
        ("/download", [n, path]) => {
            let index = n
                .parse::<usize>()
                .ok()
                .filter(|i| *i > 0)
                .ok_or_else(|| format!("`{n}` is not a document number"))?;
            ShellCommand::Download {
                index,
                path: PathBuf::from(path),
            }
        }
        ("/download", _) => return Err("usage: /download <n> <path>".into()),
        ("/templates", []) => ShellCommand::Templates,
        ("/resources", []) => ShellCommand::Resources(None),
        ("/resources", [category]) => ShellCommand::Resources(Some((*category).to_string())),
        ("/view", [name]) => ShellCommand::View(
            name.parse()
                .map_err(|_| format!("unknown view `{name}`"))?,
        ),
        ("/views", []) => ShellCommand::Views,
        ("/reset", []) => ShellCommand::Reset,
        ("/health", []) => ShellCommand::Health,
        ("/help", []) => ShellCommand::Help,
        ("/quit" | "/exit", []) => ShellCommand::Quit,
        _ => return Err(format!("unknown command `{line}`, try /help")),
    };
    Ok(command)
}

/// Runs the `lexaid shell` interactive REPL.
pub async fn run_shell(config: LexaidConfig) -> Result<(), LexaidError> {
    let service = Arc::new(HttpLegalService::new(&config)?);
    let workflow = IssueWorkflow::new(service, &config.workflow);

    let session_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("shell", session_id = %session_id);

    async {
        info!(base_url = %config.service.base_url, "intake session started");
        if config.workflow.fetch_reference_data {
            workflow.load_reference_data().await;
        }
        repl(&workflow).await
    }
    .instrument(span)
    .await
}

async fn repl(workflow: &IssueWorkflow) -> Result<(), LexaidError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| LexaidError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "lexaid shell".bold().green());
    println!(
        "Type {} to describe your issue, {} for commands, {} to exit.\n",
        "/submit".yellow(),
        "/help".yellow(),
        "/quit".yellow()
    );

    loop {
        let prompt = format!("{}:{}> ", "lexaid".green(), workflow.active_view());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{}: {message}", "error".red());
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    break;
                }
                debug!(?command, "shell command");
                let records_failure = command.records_failure();
                if let Err(e) = execute(workflow, &mut rl, command).await {
                    let recorded = workflow.error().filter(|_| records_failure);
                    eprint!("{}", render::error(&e, recorded.as_deref()));
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    info!("intake session ended");
    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn execute(
    workflow: &IssueWorkflow,
    rl: &mut DefaultEditor,
    command: ShellCommand,
) -> Result<(), LexaidError> {
    match command {
        ShellCommand::Submit => {
            let Some(submission) = prompt_submission(rl)? else {
                return Ok(());
            };
            println!("{}", "Analyzing your issue...".dimmed());
            workflow.submit_issue(submission).await?;
            print!("{}", show_view(workflow, workflow.active_view()));
        }
        ShellCommand::Advice => {
            println!("{}", "Preparing advice...".dimmed());
            workflow.request_advice().await?;
            print!("{}", show_view(workflow, View::Advice));
        }
        ShellCommand::Generate {
            template_id,
            document_type,
        } => {
            println!("{}", "Generating document...".dimmed());
            workflow.generate_document(template_id, document_type).await?;
            print!("{}", show_view(workflow, View::Documents));
        }
        ShellCommand::Documents => {
            print!("{}", show_view(workflow, View::Documents));
        }
        ShellCommand::Download { index, path } => {
            let case = workflow.case();
            let document = case.documents().get(index - 1).ok_or_else(|| {
                LexaidError::Validation(format!("no document number {index}"))
            })?;
            let bytes = workflow.download_document(document).await?;
            tokio::fs::write(&path, &bytes).await.map_err(|e| {
                LexaidError::Internal(format!("failed to write {}: {e}", path.display()))
            })?;
            println!("saved {} ({} bytes)", path.display(), bytes.len());
        }
        ShellCommand::Templates => print!("{}", render::templates(&workflow.templates())),
        ShellCommand::Resources(category) => {
            let resources = match category {
                Some(category) => workflow.resources_for_category(&category),
                None => workflow.resources(),
            };
            print!("{}", render::resources(&resources));
        }
        ShellCommand::View(view) => {
            workflow.navigate(view)?;
            print!("{}", show_view(workflow, view));
        }
        ShellCommand::Views => {
            print!(
                "{}",
                render::views(workflow.active_view(), &workflow.enabled_views())
            );
        }
        ShellCommand::Reset => {
            workflow.reset();
            println!("{}", "Case cleared.".dimmed());
        }
        ShellCommand::Health => {
            let status = workflow.health_check().await?;
            print!("{}: {}", workflow.service_name(), render::health(&status));
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}

/// Collects a submission interactively. `None` when the user aborts.
fn prompt_submission(rl: &mut DefaultEditor) -> Result<Option<IssueSubmission>, LexaidError> {
    let Some(description) = ask(rl, "Describe your legal issue: ")? else {
        return Ok(None);
    };
    let Some(location) = ask(rl, "Location (optional): ")? else {
        return Ok(None);
    };
    let Some(email) = ask(rl, "Email (optional): ")? else {
        return Ok(None);
    };
    let Some(urgency) = ask(rl, "Urgency [low/medium/high] (medium): ")? else {
        return Ok(None);
    };

    Ok(Some(
        IssueSubmission::new(description)
            .with_location(location)
            .with_email(email)
            .with_urgency(parse_urgency(&urgency)?),
    ))
}

fn parse_urgency(input: &str) -> Result<Urgency, LexaidError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Urgency::default());
    }
    trimmed
        .parse()
        .map_err(|_| LexaidError::Validation(format!("unknown urgency `{trimmed}`")))
}

fn ask(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>, LexaidError> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(LexaidError::Internal(format!("readline failed: {e}"))),
    }
}

/// Renders the content behind `view` from the workflow's current case.
fn show_view(workflow: &IssueWorkflow, view: View) -> String {
    let case = workflow.case();
    match view {
        View::Submit => format!("{}\n", "Use /submit to describe your issue.".dimmed()),
        View::Analysis => match (case.issue_id(), case.analysis()) {
            (Some(id), Some(analysis)) => render::analysis(id, analysis),
            _ => String::new(),
        },
        View::Advice => case.advice().map(render::advice).unwrap_or_default(),
        View::Documents => render::documents(case.documents(), |doc| workflow.download_link(doc)),
        View::Resources => {
            let resources = match case.analysis() {
                Some(analysis) => workflow.resources_for_category(&analysis.category),
                None => workflow.resources(),
            };
            render::resources(&resources)
        }
    }
}
