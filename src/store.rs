use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::gift::Gift;
use crate::report::{rank_categories, RankedGift, Results, TopResult};
use crate::{Error, GIFT_COUNT, MAX_SCORE, QUESTION_COUNT};

/// 回答者ひとり分の回答（設問1〜200、各々未回答または0〜5）
///
/// 呼び出し側が所有し、回答者間で共有しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    values: [Option<u8>; QUESTION_COUNT],
}

impl Default for AnswerStore {
    fn default() -> Self {
        Self {
            values: [None; QUESTION_COUNT],
        }
    }
}

/// 検証に失敗して読み飛ばした保存データの項目
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ImportSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

fn slot(question_no: u32) -> Result<usize, Error> {
    if (1..=QUESTION_COUNT as u32).contains(&question_no) {
        Ok((question_no - 1) as usize)
    } else {
        Err(Error::IllegalQuestion(i64::from(question_no)))
    }
}

fn check_score(score: u8) -> Result<u8, Error> {
    if score <= MAX_SCORE {
        Ok(score)
    } else {
        Err(Error::IllegalAnswer(i64::from(score)))
    }
}

/// 保存データの値を整数として読む
/// 数値文字列と小数部のない数値（`1.0`）は可、真偽値・小数・nullは不可。
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

impl AnswerStore {
    /// 設問番号を指定して回答を格納する
    /// 範囲外の設問番号・回答は何も変更せずにエラーとする。
    pub fn set_answer(&mut self, question_no: u32, score: u8) -> Result<(), Error> {
        let offset = slot(question_no)?;
        let score = check_score(score)?;
        if let Some(previous) = self.values[offset].replace(score) {
            debug!(question_no, previous, score, "answer overwritten");
        } else {
            debug!(question_no, score, "answer recorded");
        }
        Ok(())
    }

    pub fn answer(&self, question_no: u32) -> Result<Option<u8>, Error> {
        Ok(self.values[slot(question_no)?])
    }

    pub fn answered_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == QUESTION_COUNT
    }

    /// 回答済みの割合（0.0〜1.0）
    pub fn progress(&self) -> f64 {
        self.answered_count() as f64 / QUESTION_COUNT as f64
    }

    /// 最も若い未回答の設問番号
    pub fn next_unanswered(&self) -> Option<u32> {
        self.values
            .iter()
            .position(Option::is_none)
            .map(|offset| offset as u32 + 1)
    }

    pub fn reset(&mut self) {
        self.values = [None; QUESTION_COUNT];
        info!("answers cleared");
    }

    /// `Gift::ALL`順の賜物別合計。未回答は0点として扱う。
    pub fn category_sums(&self) -> [u8; GIFT_COUNT] {
        let mut sums = [0u8; GIFT_COUNT];
        for (offset, value) in self.values.iter().enumerate() {
            sums[offset % GIFT_COUNT] += value.unwrap_or(0);
        }
        sums
    }

    pub fn score_of(&self, gift: Gift) -> u8 {
        gift.questions()
            .map(|q| self.values[(q - 1) as usize].unwrap_or(0))
            .sum()
    }

    pub fn ranking(&self) -> Vec<RankedGift> {
        rank_categories(&self.category_sums())
    }

    pub fn top_result(&self) -> Result<TopResult, Error> {
        TopResult::from_ranking(&self.ranking())
    }

    pub fn results(&self) -> Result<Results, Error> {
        Results::new(self.ranking())
    }

    /// 保存ファイルの内容。回答済みの設問のみを設問番号順に出力する。
    pub fn export_state(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        info!(answered = self.answered_count(), "progress exported");
        // serde_jsonの出力は常にUTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// 保存ファイルの内容で回答を置き換える
    ///
    /// JSONオブジェクトでなければ何も変更せずにエラーとする。
    /// 設問番号・回答が不正な項目は読み飛ばし、結果に件数を含める。
    pub fn import_state(&mut self, data: &str) -> Result<ImportSummary, Error> {
        let entries: Map<String, Value> =
            serde_json::from_str(data).map_err(Error::ImportParse)?;

        let mut store = AnswerStore::default();
        let mut summary = ImportSummary::default();
        for (key, value) in entries {
            let question_no = key.trim().parse::<i64>().ok();
            let score = as_integer(&value);
            let accepted = match (question_no, score) {
                (Some(q), Some(s))
                    if (1..=QUESTION_COUNT as i64).contains(&q)
                        && (0..=i64::from(MAX_SCORE)).contains(&s) =>
                {
                    store.set_answer(q as u32, s as u8).is_ok()
                }
                _ => false,
            };
            if accepted {
                summary.loaded += 1;
            } else {
                warn!(question = %key, score = %value, "skipped invalid saved answer");
                summary.skipped.push(SkippedEntry { key, value });
            }
        }

        *self = store;
        info!(
            loaded = summary.loaded,
            skipped = summary.skipped_count(),
            "progress imported"
        );
        Ok(summary)
    }
}

impl Serialize for AnswerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.answered_count()))?;
        for (offset, value) in self.values.iter().enumerate() {
            if let Some(score) = value {
                map.serialize_entry(&(offset + 1).to_string(), score)?;
            }
        }
        map.end()
    }
}
