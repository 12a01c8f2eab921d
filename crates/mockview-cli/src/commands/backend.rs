use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use mockview_core::llm::LanguageModel;

pub async fn health(app: &App) {
    if app.gateway.check_health().await {
        println!(
            "{} {} ({})",
            "OK".bright_green().bold(),
            app.gateway.base_url(),
            app.gateway.model()
        );
    } else {
        println!(
            "{} cannot reach {}. Is Ollama running?",
            "DOWN".bright_red().bold(),
            app.gateway.base_url()
        );
    }
}

pub async fn models(app: &App) -> Result<()> {
    let models = app.gateway.list_models().await?;
    if models.is_empty() {
        println!("{}", "No models installed.".bright_black());
    }
    for model in models {
        let marker = if model == app.gateway.model() { "*" } else { " " };
        println!("{marker} {model}");
    }
    Ok(())
}
