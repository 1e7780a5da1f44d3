use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use url_summarizer::{
    config::{PipelineConfig, ServerConfig},
    api::routes::create_router,
    logging::init_logging,
    presenter::{run_action, ViewState},
    AppState,
};

#[derive(Parser)]
#[command(
    name = "url-summarizer",
    about = "Summarize a web page or YouTube transcript with a hosted language model"
)]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,

    #[command(flatten)]
    pipeline: PipelineConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the summarizer page (default)
    Serve,
    /// Summarize one URL and print the result
    Summarize {
        #[arg(long)]
        url: String,

        /// Groq API key
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "")]
        api_key: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let pipeline = cli.pipeline.build_pipeline()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let server_addr = cli.server.server_addr()?;
            let app = create_router(AppState::new(pipeline));

            let listener = TcpListener::bind(server_addr).await?;
            tracing::info!(%server_addr, model = %cli.pipeline.model, "Listening");
            axum::serve(listener, app).await?;
        }
        Command::Summarize { url, api_key } => match run_action(&pipeline, &api_key, &url).await {
            ViewState::SummaryDisplayed(result) => println!("{}", result.summary),
            ViewState::ErrorDisplayed(message) => {
                eprintln!("{}", message);
                std::process::exit(1);
            }
            state => tracing::warn!(?state, "Action ended without a result"),
        },
    }

    Ok(())
}
