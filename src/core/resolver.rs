use crate::core::table::{FortuneKey, FortuneTable, DEFAULT_FORTUNE};
use crate::domain::model::Category;

/// Picks needed for a complete game.
pub const SUBMISSION_LEN: usize = 5;

const FALLBACK_PICK: &str = "red";

/// Ordered picks from one game. Shorter input is replaced wholesale by
/// five reds; tokens outside the color domain are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<'a> {
    picks: Vec<&'a str>,
}

impl<'a> Submission<'a> {
    pub fn from_picks<S: AsRef<str>>(picks: &'a [S]) -> Self {
        if picks.len() < SUBMISSION_LEN {
            return Self {
                picks: vec![FALLBACK_PICK; SUBMISSION_LEN],
            };
        }
        Self {
            picks: picks.iter().map(AsRef::as_ref).collect(),
        }
    }

    pub fn picks(&self) -> &[&'a str] {
        &self.picks
    }

    pub fn first(&self) -> &'a str {
        self.picks.first().copied().unwrap_or(FALLBACK_PICK)
    }

    pub fn last(&self) -> &'a str {
        self.picks.last().copied().unwrap_or(FALLBACK_PICK)
    }

    /// Most frequent token. Ties go to the token seen first.
    pub fn most(&self) -> &'a str {
        // (token, count) in first-occurrence order
        let mut counts: Vec<(&'a str, usize)> = Vec::new();
        for &pick in &self.picks {
            match counts.iter_mut().find(|(token, _)| *token == pick) {
                Some((_, count)) => *count += 1,
                None => counts.push((pick, 1)),
            }
        }

        let mut best: Option<(&'a str, usize)> = None;
        for (token, count) in counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((token, count));
            }
        }

        best.map(|(token, _)| token).unwrap_or(FALLBACK_PICK)
    }
}

impl FortuneKey {
    /// `None` when any key part is not a known color.
    pub fn derive(submission: &Submission<'_>) -> Option<Self> {
        Some(Self {
            first: submission.first().parse::<Category>().ok()?,
            last: submission.last().parse::<Category>().ok()?,
            most: submission.most().parse::<Category>().ok()?,
        })
    }
}

/// Maps a game's picks to its fortune. Never fails: unknown keys get the
/// default message.
pub fn resolve<S: AsRef<str>>(picks: &[S]) -> &'static str {
    let submission = Submission::from_picks(picks);

    match FortuneKey::derive(&submission) {
        Some(key) => {
            tracing::debug!(
                "Fortune key: first={}, last={}, most={}",
                key.first,
                key.last,
                key.most
            );
            FortuneTable::global().get(&key).unwrap_or(DEFAULT_FORTUNE)
        }
        None => {
            tracing::debug!(
                "Unrecognized fortune key: first={}, last={}, most={}",
                submission.first(),
                submission.last(),
                submission.most()
            );
            DEFAULT_FORTUNE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_RED_RED: &str = "情熱が爆発する一年！\nあなたの勢いは誰にも止められません。";

    #[test]
    fn test_short_input_falls_back_to_all_red() {
        let empty: [&str; 0] = [];
        assert_eq!(resolve(&empty), RED_RED_RED);
        assert_eq!(resolve(&["red"]), RED_RED_RED);
        assert_eq!(resolve(&["purple", "purple", "purple", "purple"]), RED_RED_RED);
        assert_eq!(resolve(&["red", "red", "red", "red", "red"]), RED_RED_RED);
    }

    #[test]
    fn test_fallback_discards_partial_input() {
        let submission = Submission::from_picks(&["yellow", "green"]);
        assert_eq!(submission.picks(), &["red"; 5]);
    }

    #[test]
    fn test_tie_goes_to_first_occurrence() {
        let submission = Submission::from_picks(&["red", "yellow", "red", "yellow", "purple"]);
        assert_eq!(submission.first(), "red");
        assert_eq!(submission.last(), "purple");
        assert_eq!(submission.most(), "red");

        let submission = Submission::from_picks(&["purple", "yellow", "yellow", "purple", "red"]);
        assert_eq!(submission.most(), "purple");
    }

    #[test]
    fn test_tie_example_resolves() {
        assert_eq!(
            resolve(&["red", "yellow", "red", "yellow", "purple"]),
            "情熱の中に気品が宿ります。\nカリスマ性を発揮できるでしょう。"
        );
    }

    #[test]
    fn test_all_yellow() {
        assert_eq!(
            resolve(&["yellow"; 5]),
            "圧倒的幸福感！\n笑顔が絶えない最高の一年になるでしょう。"
        );
    }

    #[test]
    fn test_unknown_tokens_in_middle_still_match() {
        assert_eq!(resolve(&["red", "green", "blue", "red", "red"]), RED_RED_RED);
    }

    #[test]
    fn test_unknown_first_gives_default() {
        assert_eq!(
            resolve(&["green", "blue", "green", "blue", "green"]),
            DEFAULT_FORTUNE
        );
    }

    #[test]
    fn test_unknown_most_gives_default() {
        assert_eq!(
            resolve(&["red", "green", "green", "green", "red"]),
            DEFAULT_FORTUNE
        );
    }

    #[test]
    fn test_unknown_last_gives_default() {
        assert_eq!(resolve(&["red", "red", "red", "red", "green"]), DEFAULT_FORTUNE);
    }

    #[test]
    fn test_distinct_positions_hit_literal_rows() {
        // first, most and last all differ, so a swapped column picks another row
        let cases = [
            (
                ["purple", "red", "red", "red", "yellow"],
                "一見クールでもハートは熱く。\nギャップ萌えで人気者に。",
            ),
            (
                ["yellow", "purple", "purple", "purple", "red"],
                "柔軟な発想で危機を回避。\n最後は情熱で押し切れます。",
            ),
            (
                ["red", "yellow", "yellow", "yellow", "purple"],
                "行動力と知恵のバランスが最高。\n予期せぬ成功を手にするかも。",
            ),
            (
                ["purple", "yellow", "yellow", "yellow", "red"],
                "知的に始まり情熱的に終わる。\nドラマチックな一年になります。",
            ),
            (
                ["yellow", "red", "red", "red", "purple"],
                "好奇心と探究心が融合。\n新しい趣味が大成する予感。",
            ),
        ];

        for (picks, expected) in cases {
            assert_eq!(resolve(&picks), expected, "{:?}", picks);
        }
    }

    #[test]
    fn test_missing_purple_rows_give_default() {
        assert_eq!(
            resolve(&["purple", "purple", "purple", "red", "yellow"]),
            DEFAULT_FORTUNE
        );
    }

    #[test]
    fn test_longer_input_is_used_as_is() {
        let picks = ["yellow", "red", "red", "red", "purple", "purple", "yellow"];
        assert_eq!(
            resolve(&picks),
            "天真爛漫さが愛される一年。\n失敗を恐れず挑戦して吉。"
        );
    }

    #[test]
    fn test_accepts_owned_strings() {
        let picks: Vec<String> = vec!["yellow".into(); 5];
        assert_eq!(resolve(&picks), resolve(&["yellow"; 5]));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let picks = ["purple", "red", "yellow", "red", "yellow"];
        assert_eq!(resolve(&picks), resolve(&picks));
    }

    #[test]
    fn test_every_row_reachable() {
        use Category::{Purple, Red, Yellow};

        // middle three picks force `most` without disturbing first/last
        for first in [Red, Yellow, Purple] {
            for most in [Red, Yellow, Purple] {
                for last in [Red, Yellow, Purple] {
                    let picks = [
                        first.as_str(),
                        most.as_str(),
                        most.as_str(),
                        most.as_str(),
                        last.as_str(),
                    ];
                    let key = FortuneKey { first, last, most };
                    let expected = FortuneTable::global().get(&key).unwrap_or(DEFAULT_FORTUNE);
                    assert_eq!(resolve(&picks), expected, "{first}/{most}/{last}");
                }
            }
        }
    }
}
