use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::Error;

/// 診断対象の20賜物（宣言順）
///
/// 設問`q`は`(q - 1) % 20`行目の賜物に属する。
/// 同点の場合もこの順で順位付けする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gift {
    Apostleship,
    Prophecy,
    Evangelism,
    Shepherding,
    Teaching,
    Serving,
    Exhortation,
    Giving,
    GivingAid,
    Compassion,
    Healing,
    WorkingMiracles,
    Tongues,
    InterpretationOfTongues,
    Wisdom,
    Knowledge,
    Faith,
    Discernment,
    Helps,
    Administration,
}

impl Gift {
    pub const ALL: [Gift; 20] = [
        Gift::Apostleship,
        Gift::Prophecy,
        Gift::Evangelism,
        Gift::Shepherding,
        Gift::Teaching,
        Gift::Serving,
        Gift::Exhortation,
        Gift::Giving,
        Gift::GivingAid,
        Gift::Compassion,
        Gift::Healing,
        Gift::WorkingMiracles,
        Gift::Tongues,
        Gift::InterpretationOfTongues,
        Gift::Wisdom,
        Gift::Knowledge,
        Gift::Faith,
        Gift::Discernment,
        Gift::Helps,
        Gift::Administration,
    ];

    /// 表示名
    pub fn name(self) -> &'static str {
        match self {
            Gift::Apostleship => "Apostleship",
            Gift::Prophecy => "Prophecy",
            Gift::Evangelism => "Evangelism",
            Gift::Shepherding => "Shepherding",
            Gift::Teaching => "Teaching",
            Gift::Serving => "Serving",
            Gift::Exhortation => "Exhortation",
            Gift::Giving => "Giving",
            Gift::GivingAid => "Giving Aid",
            Gift::Compassion => "Compassion",
            Gift::Healing => "Healing",
            Gift::WorkingMiracles => "Working Miracles",
            Gift::Tongues => "Tongues",
            Gift::InterpretationOfTongues => "Interpretation of Tongues",
            Gift::Wisdom => "Wisdom",
            Gift::Knowledge => "Knowledge",
            Gift::Faith => "Faith",
            Gift::Discernment => "Discernment",
            Gift::Helps => "Helps",
            Gift::Administration => "Administration",
        }
    }

    /// 採点表の行番号（0始まり）
    pub fn row(self) -> usize {
        self as usize
    }

    pub fn from_row(row: usize) -> Option<Gift> {
        Gift::ALL.get(row).copied()
    }

    /// この賜物に属する設問番号 `row+1, row+21, ..., row+181`
    pub fn questions(self) -> impl Iterator<Item = u32> {
        let first = self.row() as u32 + 1;
        let stride = crate::GIFT_COUNT as u32;
        (0..crate::QUESTIONS_PER_GIFT as u32).map(move |col| first + col * stride)
    }

    /// 設問番号から賜物を引く。1〜200以外は`None`。
    pub fn for_question(question_no: u32) -> Option<Gift> {
        if (1..=crate::QUESTION_COUNT as u32).contains(&question_no) {
            Gift::from_row(((question_no - 1) % crate::GIFT_COUNT as u32) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Gift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gift {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Gift::ALL
            .iter()
            .copied()
            .find(|gift| gift.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownGift(s.to_string()))
    }
}

/// 最上位の賜物に表示する参照データ
#[derive(Debug, Clone)]
pub struct GiftProfile {
    /// この賜物を第一の賜物とするキリスト者の推定割合（%）
    pub rarity: u8,
    pub message: &'static str,
}

static RARITY: [(Gift, u8); 20] = [
    (Gift::Apostleship, 2),
    (Gift::Prophecy, 3),
    (Gift::Evangelism, 4),
    (Gift::Shepherding, 2),
    (Gift::Teaching, 9),
    (Gift::Serving, 8),
    (Gift::Exhortation, 5),
    (Gift::Giving, 3),
    (Gift::GivingAid, 5),
    (Gift::Compassion, 4),
    (Gift::Healing, 4),
    (Gift::WorkingMiracles, 1),
    (Gift::Tongues, 3),
    (Gift::InterpretationOfTongues, 1),
    (Gift::Wisdom, 4),
    (Gift::Knowledge, 4),
    (Gift::Faith, 7),
    (Gift::Discernment, 5),
    (Gift::Helps, 9),
    (Gift::Administration, 3),
];

static MESSAGES: [(Gift, &str); 20] = [
    (
        Gift::Apostleship,
        "You're a trailblazer! With Apostleship as your top gift, you're called to pioneer new paths and build foundations for others. Embrace this rare calling: it's a foundational gift that changes lives and expands God's kingdom!",
    ),
    (
        Gift::Prophecy,
        "What a powerful voice! Prophecy means you're tuned into God's messages for today. Speak boldly and watch how your words inspire transformation. You have a distinct and vital role in the body.",
    ),
    (
        Gift::Evangelism,
        "You're a natural sharer of good news! Evangelism lights up the world, and with this gift, you're equipped to draw others closer to faith in exciting ways. Your passion is contagious!",
    ),
    (
        Gift::Shepherding,
        "A heart for guiding others! Shepherding means nurturing and leading with care. Your unique ability to provide empathy and direction will help many find their way and feel deeply supported.",
    ),
    (
        Gift::Teaching,
        "Knowledge unlocked! Your Teaching gift makes complex truths accessible and life-changing. Your wisdom is needed: keep sharing what you know; the world needs more accessible insight like yours.",
    ),
    (
        Gift::Serving,
        "The ultimate helper! Serving brings joy through action, and your willingness to step up makes every community stronger and brighter. Your actions are the foundation of ministry success.",
    ),
    (
        Gift::Exhortation,
        "Encourager extraordinaire! Exhortation lifts spirits and motivates growth. Your uplifting words can turn challenges into triumphs and help others see their full potential.",
    ),
    (
        Gift::Giving,
        "Generosity flows from you! With Giving, you bless others abundantly, creating ripples of provision and hope wherever you go. You are a crucial source of provision for God's work.",
    ),
    (
        Gift::GivingAid,
        "A true supporter! Giving Aid means you're there in practical ways, easing burdens and showing love through deeds that matter. Your hands-on support provides stability and strength.",
    ),
    (
        Gift::Compassion,
        "Heart of mercy! Compassion drives you to comfort and heal emotionally. Your empathy is a powerful gift that mends broken spirits and connects people to God's love.",
    ),
    (
        Gift::Healing,
        "Restorer of wholeness! Healing brings renewal, and your gift can touch lives in profound, miraculous ways. Expect the impossible and step out in faith to see renewal.",
    ),
    (
        Gift::WorkingMiracles,
        "Wonder-worker! Working Miracles means stepping into the extraordinary. As a member of a very small group of believers with this gift, expect the impossible and watch faith soar.",
    ),
    (
        Gift::Tongues,
        "Bridge-builder across languages! Tongues opens doors for deeper connection and worship in diverse ways. Your gift fosters intimacy with God and unity in the church.",
    ),
    (
        Gift::InterpretationOfTongues,
        "Decoder of mysteries! Your Interpretation gift brings clarity and unity, turning unknowns into shared revelations. You are uniquely gifted to bring understanding and build up the body.",
    ),
    (
        Gift::Wisdom,
        "Sage advisor! Wisdom guides decisions with divine insight. Your counsel is a beacon for those seeking direction; people trust your deep, spiritual discernment.",
    ),
    (
        Gift::Knowledge,
        "Seeker of truths! Knowledge uncovers depths that enlighten and empower. Keep exploring and sharing what you find; you are called to bring clarity to complex truths.",
    ),
    (
        Gift::Faith,
        "Unshakable believer! Faith moves mountains, and yours inspires others to trust in the unseen with bold confidence. Your unwavering trust encourages everyone around you to dream bigger.",
    ),
    (
        Gift::Discernment,
        "Sharp perceiver! Discernment protects and directs, helping navigate truth from deception with clarity. Your insight is essential for guiding others away from harm.",
    ),
    (
        Gift::Helps,
        "Behind-the-scenes hero! Helps makes everything run smoothly. Your support amplifies everyone's efforts, making you invaluable to the church's operation and success.",
    ),
    (
        Gift::Administration,
        "Master organizer! Administration brings order to chaos, turning visions into reality with efficiency and grace. Your ability to organize ensures long-term fruitfulness and growth.",
    ),
];

/// 割合表とメッセージ表を賜物で結合したもの
///
/// どちらかの表に欠けている賜物は含めない。
/// `profile`が`None`を返すのは両表の不整合を意味する。
pub static PROFILES: Lazy<HashMap<Gift, GiftProfile>> = Lazy::new(|| {
    let messages: HashMap<Gift, &'static str> = MESSAGES.iter().copied().collect();
    RARITY
        .iter()
        .filter_map(|&(gift, rarity)| {
            messages
                .get(&gift)
                .map(|&message| (gift, GiftProfile { rarity, message }))
        })
        .collect()
});

pub fn profile(gift: Gift) -> Option<&'static GiftProfile> {
    PROFILES.get(&gift)
}
