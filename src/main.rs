use clap::{Parser, Subcommand};
use cyprium::cli::{
    about, alphaspaces_demo, alphaspaces_hide, alphaspaces_unhide, biliteral_cypher,
    biliteral_decypher, cypher_text, decypher_text, demo, format_outcome, list_languages,
    read_input, write_output, CypherOptions, DecypherOptions, Tool,
};
use cyprium::vigenere::Algorithm;
use cyprium::{Languages, Result, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Version info from build.rs
const VERSION: &str = env!("CYPRIUM_VERSION");
const PROFILE: &str = env!("CYPRIUM_PROFILE");
const GIT_HASH: &str = env!("CYPRIUM_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "cyprium")]
#[command(author, about = "Classical text cyphers and their cryptanalysis", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Settings file (JSON), defaults to $CYPRIUM_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log the cryptanalysis steps on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Vigenère family cyphers
    #[command(alias = "v")]
    Vigenere {
        #[command(subcommand)]
        action: VigenereAction,
    },

    /// Biliteral A/B code
    #[command(alias = "b")]
    Biliteral {
        #[command(subcommand)]
        action: BiliteralAction,
    },

    /// Hide letters in the spaces of a text
    #[command(alias = "s")]
    Alphaspaces {
        #[command(subcommand)]
        action: AlphaspacesAction,
    },

    /// List the language profiles
    #[command(alias = "l")]
    Languages,

    /// Show the help page of a tool
    About {
        /// vigenere, biliteral or alphaspaces
        #[arg(value_parser = parse_tool)]
        tool: Tool,
    },
}

#[derive(Subcommand)]
enum VigenereAction {
    /// Cypher a text
    #[command(alias = "c")]
    Cypher {
        /// Cypher variant
        #[arg(long, short, default_value = "vigenere", value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Key (digits for gronsfeld)
        #[arg(long, short, required = true)]
        key: String,

        /// Drop spaces from the output
        #[arg(long)]
        no_spaces: bool,

        #[command(flatten)]
        io: TextIo,
    },

    /// Decypher a text; without a key, break it
    #[command(alias = "d")]
    Decypher {
        /// Cypher variant
        #[arg(long, short, default_value = "vigenere", value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Key, when known
        #[arg(long, short)]
        key: Option<String>,

        /// Key length, when known
        #[arg(long, conflicts_with = "key")]
        length: Option<usize>,

        /// Plain text language code, when known
        #[arg(long, conflicts_with = "key")]
        language: Option<String>,

        /// Drop spaces from the output
        #[arg(long)]
        no_spaces: bool,

        #[command(flatten)]
        io: TextIo,
    },

    /// Show some examples
    Demo,
}

#[derive(Subcommand)]
enum BiliteralAction {
    /// Encode lowercase letters
    #[command(alias = "c")]
    Cypher {
        #[command(flatten)]
        io: TextIo,
    },

    /// Decode A/B groups
    #[command(alias = "d")]
    Decypher {
        #[command(flatten)]
        io: TextIo,
    },
}

#[derive(Subcommand)]
enum AlphaspacesAction {
    /// Hide data into a text
    Hide {
        /// Letters to hide
        #[arg(long, required = true)]
        data: String,

        /// Cover text
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// Cover text file
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Find the data hidden into a text
    Unhide {
        /// Text with hidden data
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// Input file
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Show some examples
    Demo,
}

#[derive(clap::Args)]
struct TextIo {
    /// Text to process
    #[arg(long, conflicts_with = "input")]
    data: Option<String>,

    /// Input file
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Output file
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn parse_algorithm(s: &str) -> std::result::Result<Algorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_tool(s: &str) -> std::result::Result<Tool, String> {
    s.parse()
}

fn init_logging(debug: bool) {
    let directive = if debug { "cyprium=debug" } else { "cyprium=warn" };
    let filter = match directive.parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("cyprium {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.debug);

    match run(command, cli.config) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: Option<PathBuf>) -> Result<String> {
    let settings = Settings::resolve(config.as_deref())?;
    debug!(?settings, "settings loaded");

    match command {
        Commands::Vigenere { action } => match action {
            VigenereAction::Cypher {
                algorithm,
                key,
                no_spaces,
                io,
            } => {
                let text = read_input(io.data, io.input.as_deref())?;
                let options = CypherOptions {
                    algorithm,
                    key,
                    preserve_spacing: !no_spaces,
                };
                write_output(&cypher_text(&text, &options)?, io.output.as_deref())
            }
            VigenereAction::Decypher {
                algorithm,
                key,
                length,
                language,
                no_spaces,
                io,
            } => {
                let text = read_input(io.data, io.input.as_deref())?;
                let options = DecypherOptions {
                    algorithm,
                    key,
                    length,
                    language,
                    preserve_spacing: !no_spaces,
                };
                let languages = Languages::load(&settings)?;
                let outcome = decypher_text(&text, &options, &languages, &settings)?;
                match io.output {
                    Some(path) => write_output(&outcome.plaintext, Some(path.as_path())),
                    None if options.key.is_some() => Ok(outcome.plaintext),
                    None => Ok(format_outcome(&outcome)),
                }
            }
            VigenereAction::Demo => demo(),
        },

        Commands::Biliteral { action } => match action {
            BiliteralAction::Cypher { io } => {
                let text = read_input(io.data, io.input.as_deref())?;
                write_output(&biliteral_cypher(&text)?, io.output.as_deref())
            }
            BiliteralAction::Decypher { io } => {
                let text = read_input(io.data, io.input.as_deref())?;
                write_output(&biliteral_decypher(&text)?, io.output.as_deref())
            }
        },

        Commands::Alphaspaces { action } => match action {
            AlphaspacesAction::Hide {
                data,
                text,
                input,
                output,
            } => {
                let text = read_input(text, input.as_deref())?;
                write_output(&alphaspaces_hide(&text, &data)?, output.as_deref())
            }
            AlphaspacesAction::Unhide { text, input } => {
                let text = read_input(text, input.as_deref())?;
                alphaspaces_unhide(&text)
            }
            AlphaspacesAction::Demo => alphaspaces_demo(),
        },

        Commands::Languages => Ok(list_languages(&Languages::load(&settings)?)),

        Commands::About { tool } => Ok(about(tool)),
    }
}
