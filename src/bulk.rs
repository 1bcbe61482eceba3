use std::io::Read;

use tracing::debug;

use crate::store::AnswerStore;
use crate::{Error, QUESTION_COUNT};

/// 一括採点用CSVを読み込む
///
/// 1行目はヘッダ。以降1行1回答者で、ID列の後に設問1, 2, ...の回答を並べる。
/// 空欄は未回答。不正な行はその行だけエラーになる。
pub fn read_bulk<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<(String, AnswerStore), Error>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| {
            record
                .map_err(Error::from)
                .and_then(|record| to_store(&record))
        })
}

fn to_store(record: &csv::StringRecord) -> Result<(String, AnswerStore), Error> {
    let mut fields = record.iter();
    let id = fields.next().unwrap_or_default().to_string();
    if record.len() > QUESTION_COUNT + 1 {
        return Err(Error::IllegalQuestion((record.len() - 1) as i64));
    }

    let mut store = AnswerStore::default();
    for (offset, field) in fields.enumerate() {
        if field.is_empty() {
            continue;
        }
        let score = field
            .parse::<i64>()
            .map_err(|_| Error::NotANumber(field.to_string()))?;
        let score = u8::try_from(score).map_err(|_| Error::IllegalAnswer(score))?;
        store.set_answer(offset as u32 + 1, score)?;
    }
    debug!(id = %id, answered = store.answered_count(), "respondent row read");
    Ok((id, store))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gift::Gift;

    fn header() -> String {
        let mut line = String::from("id");
        for q in 1..=200 {
            line.push_str(&format!(",{}", q));
        }
        line
    }

    #[test]
    fn test_read_bulk() {
        let data = format!("{}\nalice,5,0,,3\nbob\n", header());
        let rows = read_bulk(data.as_bytes()).collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);

        let (id, store) = rows[0].as_ref().unwrap();
        assert_eq!(id, "alice");
        assert_eq!(store.answered_count(), 3);
        assert_eq!(store.answer(1).unwrap(), Some(5));
        assert_eq!(store.answer(2).unwrap(), Some(0));
        assert_eq!(store.answer(3).unwrap(), None);
        assert_eq!(store.top_result().unwrap().gift, Gift::Apostleship);

        let (id, store) = rows[1].as_ref().unwrap();
        assert_eq!(id, "bob");
        assert_eq!(store.answered_count(), 0);
    }

    #[test]
    fn test_read_bulk_full_row() {
        let answers = (1..=200)
            .map(|q| if q % 20 == 5 { "5" } else { "1" })
            .collect::<Vec<_>>()
            .join(",");
        let data = format!("{}\ncarol,{}\n", header(), answers);
        let (_, store) = read_bulk(data.as_bytes()).next().unwrap().unwrap();
        assert!(store.is_complete());
        let top = store.top_result().unwrap();
        assert_eq!(top.gift, Gift::Teaching);
        assert_eq!(top.score, 50);
    }

    #[test]
    fn test_bad_rows_do_not_stop_reading() {
        let data = format!("{}\nx,6\ny,abc\nz,-1\nw,4\n", header());
        let rows = read_bulk(data.as_bytes()).collect::<Vec<_>>();
        assert!(matches!(rows[0], Err(Error::IllegalAnswer(6))));
        assert!(matches!(rows[1], Err(Error::NotANumber(_))));
        assert!(matches!(rows[2], Err(Error::IllegalAnswer(-1))));
        assert_eq!(rows[3].as_ref().unwrap().1.answer(1).unwrap(), Some(4));
    }

    #[test]
    fn test_too_many_columns() {
        let answers = vec!["1"; 201].join(",");
        let data = format!("{}\nv,{}\n", header(), answers);
        let row = read_bulk(data.as_bytes()).next().unwrap();
        assert!(matches!(row, Err(Error::IllegalQuestion(201))));
    }
}
