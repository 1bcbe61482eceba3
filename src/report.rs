use std::fmt;

use crate::gift::{self, Gift};
use crate::{Error, GIFT_COUNT};

/// 賜物ごとの合計点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedGift {
    pub score: u8,
    pub gift: Gift,
}

/// 20賜物の合計点を高い順に並べる
///
/// `sort_by`は安定ソートなので、同点は`Gift::ALL`の宣言順のまま。
pub fn rank_categories(sums: &[u8; GIFT_COUNT]) -> Vec<RankedGift> {
    let mut ranked = Gift::ALL
        .iter()
        .zip(sums.iter())
        .map(|(&gift, &score)| RankedGift { score, gift })
        .collect::<Vec<RankedGift>>();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// 1位の賜物と参照データ
#[derive(Debug, Clone)]
pub struct TopResult {
    pub gift: Gift,
    pub score: u8,
    pub rarity: u8,
    pub message: &'static str,
}

impl TopResult {
    pub fn from_ranking(ranked: &[RankedGift]) -> Result<TopResult, Error> {
        let first = ranked.first().ok_or(Error::EmptyRanking)?;
        let profile = gift::profile(first.gift).ok_or(Error::MissingProfile(first.gift))?;
        Ok(TopResult {
            gift: first.gift,
            score: first.score,
            rarity: profile.rarity,
            message: profile.message,
        })
    }
}

/// 結果レポート
///
/// `Display`でダウンロード用のテキストを出力する。
#[derive(Debug, Clone)]
pub struct Results {
    pub top: TopResult,
    pub ranked: Vec<RankedGift>,
}

impl Results {
    pub const TOP_N: usize = 4;

    pub fn new(ranked: Vec<RankedGift>) -> Result<Results, Error> {
        let top = TopResult::from_ranking(&ranked)?;
        Ok(Results { top, ranked })
    }

    /// 上位`n`件（20件を超える指定は20件）
    pub fn top(&self, n: usize) -> &[RankedGift] {
        &self.ranked[..n.min(self.ranked.len())]
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Spiritual Gifts Assessment Results ---")?;
        writeln!(f)?;
        writeln!(
            f,
            "TOP GIFT: {} (Score: {}, Rarity: {}% of Christians with this primary gift)",
            self.top.gift, self.top.score, self.top.rarity
        )?;
        writeln!(f)?;
        writeln!(f, "Your Top {} Gifts:", Self::TOP_N)?;
        for (rank, ranked) in self.top(Self::TOP_N).iter().enumerate() {
            writeln!(f, "{}. {} (Score: {})", rank + 1, ranked.gift, ranked.score)?;
        }
        writeln!(f)?;
        writeln!(f, "Encouragement Message: {}", self.top.message)?;
        writeln!(f)?;
        writeln!(f, "Full Score Breakdown:")?;
        for ranked in &self.ranked {
            writeln!(f, "- {}: {}", ranked.gift, ranked.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rank_descending() {
        let mut sums = [0u8; GIFT_COUNT];
        sums[Gift::Faith.row()] = 40;
        sums[Gift::Helps.row()] = 12;
        sums[Gift::Prophecy.row()] = 30;

        let ranked = rank_categories(&sums);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0], RankedGift { score: 40, gift: Gift::Faith });
        assert_eq!(ranked[1], RankedGift { score: 30, gift: Gift::Prophecy });
        assert_eq!(ranked[2], RankedGift { score: 12, gift: Gift::Helps });
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_ties_keep_declaration_order() {
        let mut sums = [0u8; GIFT_COUNT];
        sums[Gift::Administration.row()] = 25;
        sums[Gift::Evangelism.row()] = 25;
        sums[Gift::Apostleship.row()] = 25;

        let ranked = rank_categories(&sums);
        assert_eq!(ranked[0].gift, Gift::Apostleship);
        assert_eq!(ranked[1].gift, Gift::Evangelism);
        assert_eq!(ranked[2].gift, Gift::Administration);

        // 0点の賜物も宣言順
        let rest: Vec<Gift> = ranked[3..].iter().map(|r| r.gift).collect();
        let expected: Vec<Gift> = Gift::ALL
            .iter()
            .copied()
            .filter(|g| {
                ![Gift::Apostleship, Gift::Evangelism, Gift::Administration].contains(g)
            })
            .collect();
        assert_eq!(rest, expected);
    }

    #[test]
    fn test_all_zero_ranking_is_declaration_order() {
        let ranked = rank_categories(&[0; GIFT_COUNT]);
        let gifts: Vec<Gift> = ranked.iter().map(|r| r.gift).collect();
        assert_eq!(gifts, Gift::ALL.to_vec());
    }

    #[test]
    fn test_top_result() {
        let mut sums = [0u8; GIFT_COUNT];
        sums[Gift::WorkingMiracles.row()] = 50;
        let top = TopResult::from_ranking(&rank_categories(&sums)).unwrap();
        assert_eq!(top.gift, Gift::WorkingMiracles);
        assert_eq!(top.score, 50);
        assert_eq!(top.rarity, 1);
        assert!(top.message.starts_with("Wonder-worker!"));
    }

    #[test]
    fn test_top_result_empty() {
        assert!(matches!(
            TopResult::from_ranking(&[]),
            Err(Error::EmptyRanking)
        ));
    }

    #[test]
    fn test_report_fields() {
        let mut sums = [0u8; GIFT_COUNT];
        sums[Gift::Teaching.row()] = 44;
        sums[Gift::Wisdom.row()] = 38;
        sums[Gift::Helps.row()] = 21;
        sums[Gift::Faith.row()] = 20;
        sums[Gift::Serving.row()] = 3;
        let results = Results::new(rank_categories(&sums)).unwrap();
        let text = results.to_string();

        assert!(text.contains(
            "TOP GIFT: Teaching (Score: 44, Rarity: 9% of Christians with this primary gift)"
        ));
        assert!(text.contains(concat!(
            "Your Top 4 Gifts:\n",
            "1. Teaching (Score: 44)\n",
            "2. Wisdom (Score: 38)\n",
            "3. Helps (Score: 21)\n",
            "4. Faith (Score: 20)\n",
        )));
        assert!(text.contains("Encouragement Message: Knowledge unlocked!"));
        assert!(text.contains("- Serving: 3\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 20);
        assert!(!text.contains("5. "));
    }

    #[test]
    fn test_top_clamps() {
        let results = Results::new(rank_categories(&[1; GIFT_COUNT])).unwrap();
        assert_eq!(results.top(4).len(), 4);
        assert_eq!(results.top(50).len(), 20);
    }
}
