//! Interactive interview REPL.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use mockview_application::{FeedbackService, InterviewService};
use mockview_core::InterviewError;
use mockview_core::feedback::FeedbackReport;
use mockview_core::persona::PersonaClassifier;
use mockview_core::session::InterviewTurn;

use crate::app::App;

const COMMANDS: &[&str] = &["/end", "/progress", "/help", "/quit"];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// What the loop should do after a line.
enum Step {
    Continue,
    Finish,
}

/// Runs one interview from the first question to the feedback report.
pub async fn run(app: &App, role: &str, mode: &str) -> Result<()> {
    let service = app.interview_service();
    let feedback = app.feedback_service();

    let intro = service.intro_message(role, mode)?;
    let (session, first_question) = service.create_session(role, mode).await?;
    let session_id = session.id().to_string();

    println!("{}", "=== Mockview ===".bright_magenta().bold());
    print_interviewer(&intro);
    println!();
    print_interviewer(&first_question);
    println!(
        "{}",
        "Type your answer, or /end to finish early, /progress, /help, /quit.".bright_black()
    );

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Interview left unfinished.".bright_black());
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        let step = match trimmed {
            "/quit" => {
                println!("{}", "Goodbye!".bright_green());
                Step::Finish
            }
            "/help" => {
                print_help();
                Step::Continue
            }
            "/progress" => {
                match service.get_session_progress(&session_id).await {
                    Ok(progress) => println!(
                        "{}",
                        format!(
                            "Question {} of {} ({}%), {} follow-ups on this question",
                            progress.current_question,
                            progress.total_questions,
                            progress.progress_percentage,
                            progress.followup_count
                        )
                        .bright_black()
                    ),
                    Err(e) => print_error(&e),
                }
                Step::Continue
            }
            "/end" => {
                finish(&service, &feedback, &session_id).await;
                Step::Finish
            }
            answer => answer_step(&service, &feedback, &session_id, answer).await,
        };

        if matches!(step, Step::Finish) {
            break;
        }
    }

    Ok(())
}

async fn answer_step(
    service: &InterviewService,
    feedback: &FeedbackService,
    session_id: &str,
    answer: &str,
) -> Step {
    if let Err(e) = service.validate_answer_length(answer) {
        print_error(&e);
        return Step::Continue;
    }

    let turn = match service.process_answer(session_id, answer).await {
        Ok(turn) => turn,
        Err(e) => {
            print_error(&e);
            return if e.is_invalid_state() || e.is_not_found() {
                Step::Finish
            } else {
                Step::Continue
            };
        }
    };

    let persona = turn.persona();
    if let Some(guidance) = PersonaClassifier::new().get_persona_guidance(persona) {
        println!("{}", guidance.yellow());
    }

    match &turn {
        InterviewTurn::Followup { content, .. } | InterviewTurn::NextQuestion { content, .. } => {
            print_interviewer(content);
            Step::Continue
        }
        InterviewTurn::Complete { content, .. } => {
            print_interviewer(content);
            finish(service, feedback, session_id).await;
            Step::Finish
        }
    }
}

async fn finish(service: &InterviewService, feedback: &FeedbackService, session_id: &str) {
    println!("{}", "Generating feedback...".bright_black());
    match service.complete_with_feedback(session_id, feedback).await {
        Ok(report) => print_report(&report),
        Err(e) => print_error(&e),
    }
}

fn print_interviewer(text: &str) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

fn print_error(error: &InterviewError) {
    tracing::warn!(error = %error, "Interview command failed");
    println!("{}", error.user_message().red());
    if error.is_retryable() {
        println!("{}", "This looks temporary. Try again in a moment.".bright_black());
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_magenta());
    println!("  /end       finish now and get feedback");
    println!("  /progress  show where you are");
    println!("  /quit      leave without feedback");
}

fn print_report(report: &FeedbackReport) {
    println!();
    println!("{}", "=== Feedback ===".bright_magenta().bold());
    println!(
        "Communication {}  Technical knowledge {}  Structure {}  (average {:.2})",
        report.scores.communication,
        report.scores.technical_knowledge,
        report.scores.structure,
        report.average_score()
    );
    println!("\n{}", "Strengths".bright_green().bold());
    for item in &report.strengths {
        println!("  + {item}");
    }
    println!("\n{}", "To improve".bright_yellow().bold());
    for item in &report.improvements {
        println!("  - {item}");
    }
    println!("\n{}", report.overall_feedback);
    println!("{}", format!("Session {}", report.session_id).bright_black());
}
