use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use recipe_intelligence::config::{load_config_from, AppConfig, Mode};
use recipe_intelligence::prompt::parse_ingredient_list;
use recipe_intelligence::{Recipe, RecipeError, RecipeGenerator, Server};

#[derive(Parser)]
#[command(
    name = "recipe-intelligence",
    version,
    about = "Generate recipes from the ingredients you have"
)]
struct Cli {
    /// Configuration file to load (extension optional)
    #[arg(long, global = true, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one recipe and print it
    Generate {
        /// Backend to use (defaults to the configured mode)
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        /// Print the recipe as JSON instead of Markdown
        #[arg(long)]
        json: bool,
        /// Ingredients, as separate arguments or comma-separated
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Enter ingredient lists interactively, one recipe per line
    Chat {
        /// Backend to start with (defaults to the configured mode)
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },
    /// Run the HTTP API
    Serve {
        /// Listen address (defaults to server.addr from the configuration)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), RecipeError> {
    let config = load_config_from(&cli.config)?;

    match cli.command {
        Command::Generate {
            mode,
            json,
            ingredients,
        } => {
            let ingredients = parse_ingredient_list(&ingredients.join(","));
            let mode = mode.unwrap_or(config.default_mode);
            let recipe = RecipeGenerator::from_config(mode, &config)?
                .generate(&ingredients)
                .await?;
            print_recipe(&recipe, json)?;
            Ok(())
        }
        Command::Chat { mode } => chat(config, mode).await,
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            info!("Starting server on {}", addr);
            Server::new(config).run(&addr).await
        }
    }
}

fn print_recipe(recipe: &Recipe, json: bool) -> Result<(), RecipeError> {
    if json {
        let rendered = serde_json::to_string_pretty(recipe)
            .map_err(|e| RecipeError::GenerationFailed(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!("{}", recipe.to_markdown());
    }
    Ok(())
}

fn report(error: &RecipeError) {
    eprintln!("Error: {}", error);
    if let Some(hint) = error.guidance() {
        eprintln!("{}", hint);
    }
}

/// Line-oriented chat: each line is a comma-separated ingredient list.
/// `/mode local|openai` switches backend, `/quit` or EOF ends the session.
async fn chat(config: AppConfig, mode: Option<Mode>) -> Result<(), RecipeError> {
    let mut mode = mode.unwrap_or(config.default_mode);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "Enter ingredients (e.g. Egg, Onions). Mode: {}. Type /quit to exit.",
        mode
    );

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line == "/quit" {
            break;
        }
        if let Some(requested) = line.strip_prefix("/mode") {
            match requested.parse::<Mode>() {
                Ok(new_mode) => {
                    mode = new_mode;
                    println!("Mode: {}", mode);
                }
                Err(e) => println!("{}", e),
            }
            continue;
        }

        let ingredients = parse_ingredient_list(line);
        if ingredients.is_empty() {
            println!("Please enter at least one ingredient.");
            continue;
        }

        let result = match RecipeGenerator::from_config(mode, &config) {
            Ok(generator) => generator.generate(&ingredients).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(recipe) => println!("{}", recipe.to_markdown()),
            Err(e) => report(&e),
        }
    }

    Ok(())
}
