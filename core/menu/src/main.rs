mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::io;
use std::process;

use adapter::{ConsoleInput, ConsolePresenter};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::MenuCommand;
use ports::inbound::RunMenuApp;
use wiring::{wire_menu, App};

/// MenuCommand をディスパッチする Runner
struct Runner {
    app: App,
}

impl RunMenuApp for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started", "cli", "lifecycle")
                .field("command", command_name)
                .field("provider", self.app.provider.as_str())
                .field("model", self.app.model.as_str()),
        );

        let result = match cmd {
            MenuCommand::Help => {
                print_help();
                Ok(0)
            }
            MenuCommand::Session => {
                let presenter = ConsolePresenter::new();
                let mut input = ConsoleInput::new(io::stdin().lock(), io::stderr());
                self.app.menu_use_case.run_session(&presenter, &mut input)
            }
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished", "cli", "lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, e.to_string(), "cli", "error"));
        }
        result
    }
}

fn cmd_name_for_log(cmd: &MenuCommand) -> &'static str {
    match cmd {
        MenuCommand::Help => "help",
        MenuCommand::Session => "session",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("menu: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help();
        return Ok(0);
    }
    let app = wire_menu(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: menu [options]");
}

fn print_help() {
    println!("Usage: menu [options]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -p, --profile <profile>    LLM profile: gemini (default) or echo (offline canned reply)");
    println!("  -m, --model <model>        Model name. Default: $MENU_MODEL, else gemini-1.5-flash");
    println!("  --temperature <t>          Sampling temperature sent to the model");
    println!("  --log-file <path>          JSONL log file. Default: <home>/logs/menu.jsonl");
    println!("  -v, --verbose              Also print log records to stderr");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish, ...)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY  API key for the gemini profile (required)");
    println!("  MENU_MODEL      Default model name");
    println!("  MENU_HOME       Home directory. If unset, $XDG_CONFIG_HOME/menu or ~/.config/menu");
    println!();
    println!("Keys:");
    println!("  home    Enter/s start, q quit");
    println!("  select  answer each question by number; avoid-foods takes a comma list");
    println!("  result  r retry, h back to home, w save, q quit");
}
