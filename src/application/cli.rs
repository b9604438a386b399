#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Agent;
use crate::domain::models::MessageType;
use crate::domain::services::ChatSession;
use crate::infrastructure::agents::Langflow;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Send your message
- Shift+Enter / Alt+Enter - Insert a new line
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U / Page Up - Page up
- CTRL+D / Page Down - Page down
- CTRL+C - Exit Macento
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn log_path() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("macento/debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Sends a single message outside of the chat UI and prints the reply. The
/// message is read from stdin when it isn't passed as an argument.
async fn ask(message: Option<&String>) -> Result<()> {
    let agent = Langflow::default();
    agent.validate()?;

    let mut session = ChatSession::default();
    if let Some(text) = message {
        session.set_pending_input(text);
    } else {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        session.set_pending_input(&text);
    }

    if !session.can_submit(session.pending_input()) {
        bail!("A message is required, either as an argument or through stdin");
    }

    session.submit_pending(&agent).await;

    if let Some(reply) = session.messages().last() {
        if reply.message_type() == MessageType::Error {
            eprintln!("{}", Paint::red(&reply.text));
            std::process::exit(1);
        }
        println!("{}", reply.text);
    }

    return Ok(());
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Send one message to the agent and print its reply.")
        .arg(
            clap::Arg::new("message")
                .help("Message to send. Read from stdin when omitted.")
                .num_args(1)
                .required(false),
        );
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Macento")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Macento with environment variable RUST_LOG=macento")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("macento")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MACENTO_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::AgentURL.to_string())
                .long(ConfigKey::AgentURL.to_string())
                .env("MACENTO_AGENT_URL")
                .num_args(1)
                .help("Langflow run endpoint of the agent flow. [default: the hosted Macento flow]")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OrgID.to_string())
                .long(ConfigKey::OrgID.to_string())
                .env("MACENTO_ORG_ID")
                .hide_env_values(true)
                .num_args(1)
                .help("Organization ID sent with every request to the agent.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Token.to_string())
                .long(ConfigKey::Token.to_string())
                .env("MACENTO_TOKEN")
                .hide_env_values(true)
                .num_args(1)
                .help("Langflow application token used as the bearer token.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("MACENTO_USERNAME")
                .num_args(1)
                .help("Your name displayed above your chat bubbles.")
                .global(true),
        );
}

/// Handles every subcommand that doesn't start the chat UI. Returns `true`
/// when the chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            ask(subcmd_matches.get_one::<String>("message")).await?;
            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
