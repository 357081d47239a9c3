use ops_assistant::{
    agent::Orchestrator,
    config::AppConfig,
    execution::ExecutionEngine,
    gemini::GeminiClient,
    planner::LlmPlanner,
    tools::create_default_tools,
    verification::Verifier,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_TASK: &str = "What's the weather in Delhi and the latest news there?";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let task = if args.is_empty() {
        SAMPLE_TASK.to_string()
    } else {
        args.join(" ")
    };

    let config = AppConfig::from_env()?;

    let generator = Arc::new(GeminiClient::from_config(&config)?);
    let (weather, news) = create_default_tools(&config)?;

    let orchestrator = Orchestrator::new(
        Box::new(LlmPlanner::new(generator.clone())),
        ExecutionEngine::new(Arc::new(weather), Arc::new(news)),
        Verifier::new(generator),
    );

    info!(task = %task, "Running task");

    match orchestrator.process_task(&task).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Task failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
