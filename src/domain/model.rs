use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three colors a player can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Red,
    Yellow,
    Purple,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Red, Category::Yellow, Category::Purple];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Red => "red",
            Category::Yellow => "yellow",
            Category::Purple => "purple",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Category::Red),
            "yellow" => Ok(Category::Yellow),
            "purple" => Ok(Category::Purple),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Body of `POST /game_clear`.
///
/// `colors` is read leniently: anything that is not an array of tokens
/// becomes an empty submission and is handled by the resolver's fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClearRequest {
    pub colors: Vec<String>,
}

impl GameClearRequest {
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;

        let colors = match value.get("colors") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    // 非字串元素保留原始 JSON 文字，永遠不會對到顏色
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self { colors })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameClearResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
