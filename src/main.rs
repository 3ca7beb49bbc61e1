mod debug_report;

use clap::Parser;
use rulebot::config::{DEFAULT_KNOWLEDGE_PATH, DEFAULT_LOG_PATH};
use rulebot::{Chatbot, Config, Journal, is_exit_command};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Rule-based console chatbot.
///
/// Without MESSAGE, starts an interactive session that ends on
/// exit / quit / bye / goodbye or end of input.
#[derive(Debug, Parser)]
#[command(name = "rulebot", version)]
struct Cli {
    /// Knowledge base (JSON object of question -> answer).
    #[arg(long = "kb", value_name = "PATH", env = "RULEBOT_KB", default_value = DEFAULT_KNOWLEDGE_PATH)]
    knowledge: PathBuf,

    /// File the conversation is appended to.
    #[arg(long, value_name = "PATH", env = "RULEBOT_LOG", default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Do not write a conversation log.
    #[arg(long)]
    no_log: bool,

    /// Print which rules were tried for every reply.
    #[arg(long)]
    explain: bool,

    /// Force ANSI color in --explain output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color in --explain output.
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    /// Reply to this message once and exit.
    #[arg(trailing_var_arg = true, value_name = "MESSAGE")]
    message: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "rulebot=debug" } else { "rulebot=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> rulebot::Result<()> {
    let config = Config { knowledge_path: cli.knowledge, log_path: (!cli.no_log).then_some(cli.log) };
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let mut bot = Chatbot::from_config(&config)?;
    let presenter = Presenter { explain: cli.explain, color };

    if !cli.message.is_empty() {
        bot.start();
        let reply = presenter.reply(&mut bot, &cli.message.join(" "));
        println!("{reply}");
        return Ok(());
    }

    session(&mut bot, presenter)
}

#[derive(Debug, Clone, Copy)]
struct Presenter {
    explain: bool,
    color: bool,
}

impl Presenter {
    fn reply<J: Journal>(&self, bot: &mut Chatbot<J>, input: &str) -> String {
        let outcome = bot.dispatch_verbose(input);
        if self.explain {
            debug_report::print_outcome(&outcome, self.color);
        }
        outcome.reply
    }
}

fn session<J: Journal>(bot: &mut Chatbot<J>, presenter: Presenter) -> rulebot::Result<()> {
    println!("=== Simple Rule-Based Chatbot (Console) ===");
    println!("Type 'help' to see commands. Type 'exit' to quit.\n");

    bot.start();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "You: ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line?;

        let reply = presenter.reply(bot, &line);
        writeln!(stdout, "Bot: {reply}\n")?;

        if is_exit_command(&line) {
            break;
        }
    }

    Ok(())
}
