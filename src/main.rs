use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use subgen::app::{run_generate_command, GenerateArgs};
use subgen::cli::{Cli, Commands, ModelsAction};
use subgen::config::Config;
use subgen::diagnostics::{check_dependencies, CheckResult};
use subgen::models::catalog::{list_models, model_path};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => {
            let video = match cli.video {
                Some(video) => video,
                None => {
                    Cli::command().print_help()?;
                    eprintln!();
                    anyhow::bail!("missing input video (try: subgen movie.mp4)");
                }
            };
            let config = load_config(cli.config.as_deref())?;
            run_generate_command(
                config,
                video,
                GenerateArgs {
                    model: cli.model,
                    language: cli.language,
                    max_line_length: cli.max_line_length,
                    max_line_duration: cli.max_line_duration,
                    no_burn: cli.no_burn,
                    output_dir: cli.output_dir,
                    quiet: cli.quiet,
                    json: cli.json,
                },
            )?;
        }
        Some(Commands::Models { action }) => match action {
            ModelsAction::List => {
                let config = load_config(cli.config.as_deref())?;
                list_catalog(&config);
            }
        },
        Some(Commands::Check) => {
            if !print_check() {
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(&Config::default_path()),
    }
}

fn list_catalog(config: &Config) {
    println!("Known models (drop files into {}):", config.stt.model_dir.display());
    println!();
    for model in list_models() {
        let installed = model_path(&config.stt.model_dir, model.name).exists();
        let marker = if installed {
            "installed".green().to_string()
        } else {
            "not installed".dimmed().to_string()
        };
        println!(
            "  {:<10} {:>5} MB  [{}]  {}",
            model.name, model.size_mb, marker, model.description
        );
    }
    println!();
    println!("Download URLs are listed at https://huggingface.co/ggerganov/whisper.cpp");
}

/// Print dependency check results. Returns true when everything is present.
fn print_check() -> bool {
    let mut ok = true;
    for (tool, result) in check_dependencies() {
        match result {
            CheckResult::Ok => println!("{} {}", "✓".green(), tool),
            CheckResult::NotFound => {
                ok = false;
                println!("{} {} not found (install FFmpeg)", "✗".red(), tool);
            }
            CheckResult::Warning(message) => println!("{} {}: {}", "!".yellow(), tool, message),
        }
    }
    ok
}
