use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use mockview_core::archive::InterviewArchive;
use mockview_core::session::MessageType;

pub async fn show(app: &App, limit: Option<usize>) -> Result<()> {
    let history = app.archive.get_user_history(limit).await?;

    if history.sessions.is_empty() {
        println!("{}", "No interviews yet.".bright_black());
        return Ok(());
    }

    for summary in &history.sessions {
        let score = summary
            .score
            .map(|score| format!("{score:.2}/5"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {:<18} {:<10} {:>6}  {}",
            summary.date.bright_black(),
            summary.role,
            summary.status.to_string(),
            score,
            summary.session_id.bright_cyan()
        );
    }

    println!();
    let average = history
        .average_score
        .map(|score| format!("{score:.2}"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{} interviews, average score {}",
        history.total_interviews, average
    );
    Ok(())
}

pub async fn transcript(app: &App, session_id: &str) -> Result<()> {
    let messages = app.archive.get_session_transcript(session_id).await?;
    for message in messages {
        let speaker = match message.message_type() {
            MessageType::Question => "Interviewer".bright_blue(),
            MessageType::Followup => "Interviewer (follow-up)".blue(),
            MessageType::Answer => "You".green(),
        };
        println!("{} {}", speaker.bold(), message.timestamp().bright_black());
        println!("{}\n", message.content());
    }
    Ok(())
}
