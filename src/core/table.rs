use crate::domain::model::Category::{self, Purple, Red, Yellow};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_FORTUNE: &str = "未知なる可能性を秘めた一年。\n自分自身で運命を切り開きましょう！";

/// Lookup key derived from a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FortuneKey {
    pub first: Category,
    pub last: Category,
    pub most: Category,
}

// Rows read (first, most, last): each message describes the opening pick,
// the dominant color, then the closing pick.
const ROWS: [((Category, Category, Category), &str); 24] = [
    ((Red, Red, Red), "情熱が爆発する一年！\nあなたの勢いは誰にも止められません。"),
    ((Red, Red, Yellow), "エネルギッシュかつ朗らかに。\n人気運が急上昇しそうです。"),
    ((Red, Red, Purple), "情熱の中に気品が宿ります。\nカリスマ性を発揮できるでしょう。"),
    ((Red, Yellow, Red), "始まりも終わりも情熱的。\n中盤の楽しみがカギを握ります。"),
    ((Red, Yellow, Yellow), "明るい未来へ突き進む年。\n笑顔が最高の武器になります。"),
    ((Red, Yellow, Purple), "行動力と知恵のバランスが最高。\n予期せぬ成功を手にするかも。"),
    ((Red, Purple, Red), "運命の歯車が、静かに動き出す。\n迷いを脱ぎ捨て、高みを目指す時。"),
    ((Red, Purple, Yellow), "リーダーシップを発揮しつつ、\n周囲への配慮も忘れない素敵な年に。"),
    ((Red, Purple, Purple), "精神的に大きく成長できる年。\n深い洞察力が身につきます。"),
    ((Yellow, Red, Red), "楽しさから始まり情熱で締める。\n最後まで駆け抜ける一年です。"),
    ((Yellow, Red, Yellow), "天真爛漫さが愛される一年。\n失敗を恐れず挑戦して吉。"),
    ((Yellow, Red, Purple), "好奇心と探究心が融合。\n新しい趣味が大成する予感。"),
    ((Yellow, Yellow, Red), "輝きに満ちた一年。\n最後のひと踏ん張りが勝利を呼びます。"),
    ((Yellow, Yellow, Yellow), "圧倒的幸福感！\n笑顔が絶えない最高の一年になるでしょう。"),
    ((Yellow, Yellow, Purple), "楽しさの中に学びがある年。\n知的探求が金運アップの鍵。"),
    ((Yellow, Purple, Red), "柔軟な発想で危機を回避。\n最後は情熱で押し切れます。"),
    ((Yellow, Purple, Yellow), "直感と理性が冴え渡る。\nあなたのアイデアが世界を変えるかも。"),
    ((Yellow, Purple, Purple), "神秘的な魅力で人を惹きつけます。\n芸術的な才能が開花しそう。"),
    ((Purple, Red, Red), "冷静な分析から行動へ。\n計画通りに物事が進むでしょう。"),
    ((Purple, Red, Yellow), "一見クールでもハートは熱く。\nギャップ萌えで人気者に。"),
    ((Purple, Red, Purple), "とことん我が道を行く年。\n独自のスタイルが確立されます。"),
    ((Purple, Yellow, Red), "知的に始まり情熱的に終わる。\nドラマチックな一年になります。"),
    ((Purple, Yellow, Yellow), "クールな知性と明るい笑顔。\n最強の愛されキャラになれそう。"),
    ((Purple, Yellow, Purple), "直感力が最高潮に達します。\n迷ったときは直感を信じて正解。"),
];

/// Read-only fortune lookup, built once per process.
#[derive(Debug)]
pub struct FortuneTable {
    entries: HashMap<FortuneKey, &'static str>,
}

impl FortuneTable {
    fn build() -> Self {
        let entries = ROWS
            .iter()
            .map(|&((first, most, last), message)| (FortuneKey { first, last, most }, message))
            .collect();
        Self { entries }
    }

    pub fn global() -> &'static FortuneTable {
        static TABLE: OnceLock<FortuneTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    pub fn get(&self, key: &FortuneKey) -> Option<&'static str> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
