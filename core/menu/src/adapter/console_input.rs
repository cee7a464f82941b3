//! 端末からのユーザー操作（ActionSource の CLI 実装）
//!
//! home / result ではコマンド語を 1 行読み、select では 6 項目を番号で順に尋ねる。
//! プロンプトは書き込み先（通常は stderr）に出す。EOF または q で終了（None）。

use crate::domain::{
    Action, ActionKind, AvoidFood, AvoidFoods, Budget, CatalogOption, Companion, FoodType, Input,
    Mood, SelectionRecord, Step, TimeSlot,
};
use crate::ports::outbound::ActionSource;
use common::error::Error;
use std::io::{BufRead, Write};

/// 1 行の解釈結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(ActionKind),
    Quit,
    Unknown,
}

/// コマンド語を解釈する。home での空行は start。
///
/// 操作名（start, submit, retry, restart, save）はどの step でも受け取り、
/// step が受け付けない操作もそのまま返す（拒否はセッション側の判断）。
pub fn parse_command(input: &str, step: Step) -> Command {
    let word = input.trim().to_lowercase();
    if word.is_empty() && step == Step::Home {
        return Command::Act(ActionKind::Start);
    }
    if let Some(kind) = ActionKind::all().iter().find(|k| k.as_str() == word) {
        return Command::Act(*kind);
    }
    match word.as_str() {
        "s" => Command::Act(ActionKind::Start),
        "r" => Command::Act(ActionKind::Retry),
        "h" | "home" => Command::Act(ActionKind::Restart),
        "w" => Command::Act(ActionKind::Save),
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

fn is_quit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}

/// 1 始まりの番号を 0 始まりの添字にする。範囲外・非数は None。
pub fn parse_single(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// カンマ区切り（空白も可）の番号列。空入力は空の選択。1 つでも不正なら None。
pub fn parse_multi(input: &str, count: usize) -> Option<Vec<usize>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_single(s, count))
        .collect()
}

fn menu_lines<T: CatalogOption>() -> String {
    T::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| format!("  {}) {}\n", i + 1, v.label()))
        .collect()
}

/// 端末入力
pub struct ConsoleInput<R: BufRead, W: Write> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }

    fn say(&mut self, text: &str) -> Result<(), Error> {
        self.prompt_out.write_all(text.as_bytes())?;
        self.prompt_out.flush()?;
        Ok(())
    }

    /// 1 行読む。EOF なら None。
    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn pick_one<T: CatalogOption>(&mut self) -> Result<Option<T>, Error> {
        self.say(&format!("\n{}\n{}", T::QUESTION, menu_lines::<T>()))?;
        loop {
            self.say("번호> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if is_quit(&line) {
                return Ok(None);
            }
            match parse_single(&line, T::ALL.len()) {
                Some(i) => return Ok(Some(T::ALL[i])),
                None => self.say(&format!("1~{} 사이의 번호를 입력해 주세요.\n", T::ALL.len()))?,
            }
        }
    }

    fn pick_many<T: CatalogOption>(&mut self) -> Result<Option<Vec<T>>, Error> {
        self.say(&format!(
            "\n{} (여러 개는 쉼표로 구분, 없으면 Enter)\n{}",
            T::QUESTION,
            menu_lines::<T>()
        ))?;
        loop {
            self.say("번호> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if is_quit(&line) {
                return Ok(None);
            }
            match parse_multi(&line, T::ALL.len()) {
                Some(idx) => return Ok(Some(idx.into_iter().map(|i| T::ALL[i]).collect())),
                None => self.say(&format!("1~{} 사이의 번호를 쉼표로 구분해 입력해 주세요.\n", T::ALL.len()))?,
            }
        }
    }

    /// select 画面: 6 項目を順に尋ねる。途中で終了したら None。
    fn collect_selections(&mut self) -> Result<Option<SelectionRecord>, Error> {
        let Some(mood) = self.pick_one::<Mood>()? else {
            return Ok(None);
        };
        let Some(food_type) = self.pick_one::<FoodType>()? else {
            return Ok(None);
        };
        let Some(time_slot) = self.pick_one::<TimeSlot>()? else {
            return Ok(None);
        };
        let Some(budget) = self.pick_one::<Budget>()? else {
            return Ok(None);
        };
        let Some(companion) = self.pick_one::<Companion>()? else {
            return Ok(None);
        };
        let Some(avoid) = self.pick_many::<AvoidFood>()? else {
            return Ok(None);
        };
        Ok(Some(SelectionRecord {
            mood,
            food_type,
            time_slot,
            budget,
            companion,
            avoid_foods: avoid.into_iter().collect::<AvoidFoods>(),
        }))
    }
}

impl<R: BufRead, W: Write> ActionSource for ConsoleInput<R, W> {
    fn next_action(&mut self, step: Step) -> Result<Option<Input>, Error> {
        if step == Step::Select {
            return Ok(self
                .collect_selections()?
                .map(|rec| Input::Action(Action::Submit(rec))));
        }
        loop {
            self.say("> ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_command(&line, step) {
                Command::Quit => return Ok(None),
                Command::Act(kind) => return Ok(Some(Input::Word(kind))),
                Command::Unknown => {
                    if !line.trim().is_empty() {
                        self.say(&format!("알 수 없는 명령이에요: {}\n", line.trim()))?;
                    }
                }
            }
        }
    }
}
