use std::fs;
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use spiritual_gifts::{init_tracing, AnswerStore, Error, Results, MAX_SCORE, QUESTION_COUNT};
use tracing::info;

/// 200設問の回答を入力して賜物を診断する
#[derive(Parser)]
struct Args {
    /// 再開する保存ファイル
    #[arg(long)]
    load: Option<PathBuf>,
    /// 終了時・完了時に進捗を書き出すファイル
    #[arg(long, default_value = "progress.json")]
    save: PathBuf,
    /// 全問回答後に結果レポートを書き出すファイル
    #[arg(long)]
    results: Option<PathBuf>,
}

enum Command {
    Score(u8),
    Edit(u32, u8),
    Progress,
    Reset,
    Quit,
}

/// コマンド適用後の状態
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Changed,
    Unchanged,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, Error> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("q") => Ok(Command::Quit),
        Some("p") => Ok(Command::Progress),
        Some("r") => Ok(Command::Reset),
        Some("e") => {
            let question_no = parse_number(words.next().unwrap_or_default())?;
            let score = parse_number(words.next().unwrap_or_default())?;
            let question_no =
                u32::try_from(question_no).map_err(|_| Error::IllegalQuestion(question_no))?;
            let score = u8::try_from(score).map_err(|_| Error::IllegalAnswer(score))?;
            Ok(Command::Edit(question_no, score))
        }
        Some(word) => {
            let score = parse_number(word)?;
            Ok(Command::Score(
                u8::try_from(score).map_err(|_| Error::IllegalAnswer(score))?,
            ))
        }
        None => Err(Error::NotANumber(String::new())),
    }
}

fn parse_number(word: &str) -> Result<i64, Error> {
    word.parse::<i64>()
        .map_err(|_| Error::NotANumber(word.to_string()))
}

/// `current`は回答中の設問。全問回答済みの結果画面では`None`。
fn apply(
    store: &mut AnswerStore,
    current: Option<u32>,
    command: Command,
) -> Result<Outcome, Error> {
    match command {
        Command::Score(score) => match current {
            Some(question_no) => {
                store.set_answer(question_no, score)?;
                Ok(Outcome::Changed)
            }
            None => {
                println!("全問回答済みです。修正は e <設問> <点数> で行ってください。");
                Ok(Outcome::Unchanged)
            }
        },
        Command::Edit(question_no, score) => {
            store.set_answer(question_no, score)?;
            Ok(Outcome::Changed)
        }
        Command::Progress => {
            println!("{}", progress_line(store));
            Ok(Outcome::Unchanged)
        }
        Command::Reset => {
            store.reset();
            Ok(Outcome::Changed)
        }
        Command::Quit => Ok(Outcome::Quit),
    }
}

fn progress_line(store: &AnswerStore) -> String {
    format!(
        "進捗: {}/{} ({:.0}%)",
        store.answered_count(),
        QUESTION_COUNT,
        store.progress() * 100.0
    )
}

fn prompt(store: &AnswerStore) -> String {
    match store.next_unanswered() {
        Some(question_no) => format!(
            "設問 {}/{} ({:.0}%) > ",
            question_no,
            QUESTION_COUNT,
            store.progress() * 100.0
        ),
        None => "結果 (e <設問> <点数>: 修正  r: 最初から  q: 終了) > ".to_string(),
    }
}

fn save(store: &AnswerStore, path: &Path) -> Result<(), Error> {
    fs::write(path, store.export_state()?)?;
    println!("{}問の回答を{}に保存しました。", store.answered_count(), path.display());
    Ok(())
}

fn show_results(store: &AnswerStore, args: &Args) -> Result<(), Error> {
    let results: Results = store.results()?;
    println!("{}", results);
    save(store, &args.save)?;
    if let Some(ref path) = args.results {
        fs::write(path, results.to_string())?;
        info!(path = %path.display(), "results written");
        println!("結果を{}に保存しました。", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let mut store = AnswerStore::default();

    if let Some(ref path) = args.load {
        let summary = store.import_state(&fs::read_to_string(path)?)?;
        if summary.skipped_count() > 0 {
            println!("不正な回答{}件を読み飛ばしました。", summary.skipped_count());
        }
        println!("{}問の回答を読み込みました。", summary.loaded);
    }

    println!(
        "各設問に0（全く当てはまらない）〜{}（強く当てはまる）で回答してください。",
        MAX_SCORE
    );
    println!("q: 保存して終了  e <設問> <点数>: 修正  r: 最初から  p: 進捗");

    let mut report_due = true;
    let mut buffer = String::new();
    loop {
        let current = store.next_unanswered();
        if current.is_none() && report_due {
            show_results(&store, &args)?;
            report_due = false;
        }

        print!("{}", prompt(&store));
        stdout().flush()?;
        buffer.clear();
        if stdin().read_line(&mut buffer)? == 0 {
            return save(&store, &args.save);
        }

        let outcome = parse_command(buffer.trim())
            .and_then(|command| apply(&mut store, current, command));
        match outcome {
            Ok(Outcome::Quit) => return save(&store, &args.save),
            Ok(Outcome::Changed) => report_due = true,
            Ok(Outcome::Unchanged) => {}
            Err(e) => println!("{}。記録されませんでした。", e),
        }
    }
}
