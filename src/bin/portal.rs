// src/bin/portal.rs

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use lang_portal::config::Config;
use lang_portal::logging::init_tracing;
use lang_portal::portal::{
    ApiClient, Command as ShellCommand, Flow, Portal,
    generate::{GENERATION_FAILED, GeneratorClient},
    launch::TerminalOpener,
    view::Theme,
};

#[derive(Parser)]
#[command(name = "portal", about = "Terminal client for the language learning portal")]
struct Cli {
    /// Backend base URL [default: PORTAL_API_URL or http://localhost:3000/api]
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Backend request timeout in seconds [default: PORTAL_TIMEOUT_SECS or 10]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
    #[arg(long, global = true, env = "PORTAL_THEME", default_value = "system", value_parser = parse_theme)]
    theme: Theme,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive shell (the default).
    Shell(ShellArgs),
    /// Render one page and exit.
    Open(OpenArgs),
    /// Ask the generator service for a vocabulary list.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ShellArgs {
    #[arg(default_value = "/dashboard")]
    path: String,
}

#[derive(Args)]
struct OpenArgs {
    #[arg(help = "Page path, e.g. /words or /groups/3")]
    path: String,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(help = "Category to generate words for, e.g. \"Kitchen\"")]
    category: String,
    /// Generator service URL [default: GENERATOR_URL or http://localhost:3001]
    #[arg(long)]
    generator_url: Option<String>,
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let guard = init_tracing(&config, "portal.log", false);
    config.log_warnings();

    let cli = Cli::parse();
    let timeout = cli.timeout.map(Duration::from_secs).unwrap_or(config.request_timeout);
    let api_url = cli.api_url.unwrap_or_else(|| config.api_base_url.clone());

    let command = cli.command.unwrap_or_else(|| {
        Command::Shell(ShellArgs {
            path: "/dashboard".to_string(),
        })
    });

    let code = match command {
        Command::Generate(args) => {
            let generator_url = args
                .generator_url
                .clone()
                .unwrap_or_else(|| config.generator_url.clone());
            generate(&generator_url, &args.category, config.generator_timeout).await
        }
        Command::Open(args) => match portal(&api_url, timeout, cli.theme) {
            Ok(mut portal) => {
                portal.navigate(&args.path);
                print!("{}", portal.render().await);
                0
            }
            Err(code) => code,
        },
        Command::Shell(args) => match portal(&api_url, timeout, cli.theme) {
            Ok(mut portal) => {
                portal.navigate(&args.path);
                run_shell(&mut portal).await
            }
            Err(code) => code,
        },
    };

    // Flush buffered log lines; `exit` skips destructors.
    drop(guard);
    std::process::exit(code);
}

fn portal(api_url: &str, timeout: Duration, theme: Theme) -> Result<Portal, i32> {
    let client = ApiClient::new(api_url, timeout).map_err(|e| {
        eprintln!("error: {}", e);
        2
    })?;
    tracing::info!(api_url, "Portal started");

    let mut portal = Portal::new(client, Box::new(TerminalOpener));
    portal.set_theme(theme);
    Ok(portal)
}

async fn run_shell(portal: &mut Portal) -> i32 {
    println!("{}", portal.render().await);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return 0,
            Err(e) => {
                eprintln!("error: failed to read input: {}", e);
                return 1;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(command) => {
                if portal.execute(command).await == Flow::Quit {
                    return 0;
                }
                println!("{}", portal.render().await);
            }
            Err(message) => println!("[!] {}", message),
        }
    }
}

async fn generate(generator_url: &str, category: &str, timeout: Duration) -> i32 {
    let client = match GeneratorClient::new(generator_url, timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    match client.generate(category).await {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", value),
            }
            0
        }
        Err(e) => {
            tracing::error!(category, "Generation failed: {}", e);
            eprintln!("[!] {}", GENERATION_FAILED);
            1
        }
    }
}
