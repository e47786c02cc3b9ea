use confluence_responder::config::Config;
use confluence_responder::event::IssueEvent;
use confluence_responder::github::IssueCommenter;
use confluence_responder::providers::completions::OpenAICompletionModel;
use confluence_responder::providers::embeddings::OpenAIEmbeddingModel;
use confluence_responder::responder::Responder;
use confluence_responder::wiki::ConfluenceClient;
use confluence_responder::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = ?e, "Responder failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let event = IssueEvent::from_file(&config.event_path).await?;
    info!(
        repo = %event.repository.full_name,
        issue = event.issue.number,
        title = %event.issue.title,
        "Handling issue event"
    );

    let wiki = ConfluenceClient::new(
        http.clone(),
        &config.confluence_base_url,
        config.confluence_user.clone(),
        config.confluence_token.clone(),
    );
    let commenter = IssueCommenter::new(
        http.clone(),
        &config.github_api_url,
        config.github_token.clone(),
    );
    let embedder = OpenAIEmbeddingModel::new(
        http.clone(),
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.embed_model.clone(),
    );
    let completion = OpenAICompletionModel::new(
        http,
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.chat_model.clone(),
    );

    let responder = Responder::new(
        wiki,
        commenter,
        Box::new(embedder),
        Box::new(completion),
        &config,
    );
    responder.run(&event, config.query_max_chars).await?;

    info!("Posted comment.");
    Ok(())
}
