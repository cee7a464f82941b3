use crate::domain::MenuCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログを stderr にも流す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub temperature: Option<f32>,
    /// --log-file: 未指定なら <home>/logs/menu.jsonl
    pub log_file: Option<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("menu")
        .about("Pick today's mood and get a one-meal menu recommendation")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile (gemini, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gemini-1.5-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("temperature")
                .long("temperature")
                .value_name("t")
                .help("Sampling temperature")
                .value_parser(value_parser!(f32))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("JSONL log file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        temperature: matches.get_one::<f32>("temperature").copied(),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "menu", &mut std::io::stdout());
}

/// Config を MenuCommand に変換する
pub fn config_to_command(config: &Config) -> MenuCommand {
    if config.help {
        MenuCommand::Help
    } else {
        MenuCommand::Session
    }
}
