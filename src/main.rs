use clap::{Parser, Subcommand};

use reply_guy::application::services::{report, Pipeline};
use reply_guy::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "reply-guy")]
#[command(about = "Analyze a tweet and draft replies with LLMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a tweet, analyze it and generate replies
    Analyze {
        /// Tweet URL (twitter.com or x.com status link)
        url: String,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { url } => {
            run_pipeline(cli.config, url);
        }
        Commands::Version => {
            println!("reply-guy v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_pipeline(config_path: String, url: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to initialize pipeline: {}", e);
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().unwrap();
    let output = match rt.block_on(pipeline.run(&url)) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Generated replies for @{}:\n", output.tweet.author.screen_name);
    for (i, reply) in output.replies.iter().enumerate() {
        println!("{}. {}\n", i + 1, reply);
    }

    let output_folder = pipeline.config().pipeline.output_folder.clone();
    match report::write_report(&output_folder, &output) {
        Ok(path) => println!("Replies generated and saved to {}", path.display()),
        Err(e) => tracing::error!("Failed to write report: {}", e),
    }
}

fn init_config() {
    let path = "config.yaml";
    if std::path::Path::new(path).exists() {
        println!("{} already exists, not overwriting", path);
        return;
    }

    match std::fs::write(path, Config::default_yaml()) {
        Ok(()) => println!("Default config written to {}", path),
        Err(e) => {
            tracing::error!("Failed to write config: {}", e);
            std::process::exit(1);
        }
    }
}
