use ops_assistant::{
    agent::Orchestrator,
    api::start_server,
    config::AppConfig,
    execution::ExecutionEngine,
    gemini::GeminiClient,
    planner::LlmPlanner,
    tools::create_default_tools,
    verification::Verifier,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("GEMINI_API_KEY must be set (see .env.example)");
            return Err(e.into());
        }
    };

    info!("Operations Assistant - API Server");
    info!("Port: {}", config.port);

    // Create components
    let generator = Arc::new(GeminiClient::from_config(&config)?);
    let (weather, news) = create_default_tools(&config)?;

    let orchestrator = Arc::new(Orchestrator::new(
        Box::new(LlmPlanner::new(generator.clone())),
        ExecutionEngine::new(Arc::new(weather), Arc::new(news)),
        Verifier::new(generator),
    ));

    info!("Orchestrator initialized");

    start_server(orchestrator, config.port).await?;

    Ok(())
}
