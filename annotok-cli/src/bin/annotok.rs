use annotok::{ConfigError, Language, Tokenizer, TokenizerConfig, TokenizerRegistry};
use annotok_cli::output::{render, OutputFormat};
use clap::{Parser, Subcommand};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON tokenizer config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of each file
    Tokens(TokensArgs),

    /// List the registered base tokenizers
    Tokenizers,
}

#[derive(Parser)]
struct TokensArgs {
    /// Source files to tokenize
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Source language; guessed from the file name when omitted
    #[arg(short, long)]
    language: Option<Language>,

    /// Base tokens without syntax annotations
    #[arg(long)]
    plain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot tell the language from the file name; pass --language")]
    UnknownLanguage,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Tokenize(#[from] annotok::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_config(path: Option<&Path>) -> Result<TokenizerConfig, CliError> {
    match path {
        Some(path) => {
            let config = TokenizerConfig::from_file(path)?;
            info!("config loaded from {}", path.display());
            Ok(config)
        }
        None => Ok(TokenizerConfig::default()),
    }
}

fn tokenize_file(
    path: &Path,
    args: &TokensArgs,
    registry: &TokenizerRegistry,
    config: &TokenizerConfig,
) -> Result<String, CliError> {
    let language = args
        .language
        .or_else(|| Language::for_path(path))
        .ok_or(CliError::UnknownLanguage)?;
    let language_config = config.language(language);
    let tokenizer: Box<dyn Tokenizer> = if args.plain {
        registry.base_tokenizer(language, &language_config)?
    } else {
        Box::new(registry.annotated_tokenizer(language, &language_config)?)
    };

    let code = fs::read_to_string(path)?;
    debug!("tokenizing {} as {}", path.display(), language);
    let stream = tokenizer.full_tokens_with_pos(&code)?;
    Ok(render(&stream, args.output)?)
}

/// Returns `false` if any file failed.
fn run_tokens(args: &TokensArgs, config: &TokenizerConfig) -> bool {
    let registry = TokenizerRegistry::new();
    let mut stdout = io::stdout().lock();
    let mut all_ok = true;

    for path in &args.files {
        match tokenize_file(path, args, &registry, config) {
            Ok(rendered) => {
                if args.files.len() > 1 && args.output == OutputFormat::Text {
                    let _ = writeln!(stdout, "# {}", path.display());
                }
                let _ = stdout.write_all(rendered.as_bytes());
            }
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                all_ok = false;
            }
        }
    }
    all_ok
}

fn run_tokenizers() {
    for (name, language) in TokenizerRegistry::new().names() {
        println!("{}\t{}", name, language);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Commands::Tokens(args) => {
            if run_tokens(args, &config) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Tokenizers => {
            run_tokenizers();
            ExitCode::SUCCESS
        }
    }
}
