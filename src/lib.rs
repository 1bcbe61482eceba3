//! 霊的賜物診断（200設問・20賜物）の採点
//!
//! 設問`q`は`(q - 1) % 20`行目の賜物に加算される。
//! 各賜物は0〜5点の回答10問の合計。

pub mod bulk;
pub mod gift;
pub mod report;
pub mod store;

pub use bulk::read_bulk;
pub use gift::{Gift, GiftProfile};
pub use report::{rank_categories, RankedGift, Results, TopResult};
pub use store::{AnswerStore, ImportSummary, SkippedEntry};

pub const QUESTION_COUNT: usize = 200;
pub const GIFT_COUNT: usize = 20;
pub const QUESTIONS_PER_GIFT: usize = QUESTION_COUNT / GIFT_COUNT;
pub const MAX_SCORE: u8 = 5;

/// stderrへのログ出力。`RUST_LOG`未設定時は`warn`。
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 200設問の範囲外
    #[error("question number {0} is outside 1-200")]
    IllegalQuestion(i64),
    /// 回答が0〜5ではない
    #[error("score {0} is outside 0-5")]
    IllegalAnswer(i64),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("unknown gift: {0}")]
    UnknownGift(String),
    /// 保存ファイルがJSONオブジェクトではない
    #[error("save file is not a valid JSON object: {0}")]
    ImportParse(#[source] serde_json::Error),
    /// 参照表に賜物が欠落している（内部不整合）
    #[error("no rarity/message entry for {0}")]
    MissingProfile(Gift),
    #[error("no gifts to rank")]
    EmptyRanking,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
