use clap::Parser;
use spiritual_gifts::{init_tracing, read_bulk, Error};
use std::fs::File;
use std::io::BufReader;
use tracing::warn;

/// CSVファイルの回答者を一括採点する
#[derive(Parser)]
struct Args {
    path: String,
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let reader = BufReader::new(File::open(&args.path)?);
    for (line, row) in read_bulk(reader).enumerate() {
        match row {
            Ok((id, store)) => match store.top_result() {
                Ok(top) => {
                    println!(
                        "id = {}, answered = {}, top = {}, score = {}",
                        id,
                        store.answered_count(),
                        top.gift,
                        top.score
                    );
                }
                Err(e) => {
                    warn!(id = %id, "{}", e);
                }
            },
            Err(e) => {
                // +2: ヘッダ行と1始まりの行番号
                warn!(row = line + 2, "{}", e);
            }
        }
    }
    Ok(())
}
