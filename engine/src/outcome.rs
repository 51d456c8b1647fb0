use serde::{Serialize, Deserialize};

/// One wedge of the wheel and the prize it pays out.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Outcome {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Human-readable name shown on the wedge.
    pub label: String,
    pub reward: Reward,
    /// Relative draw likelihood. Weights are normalized by their sum, so a
    /// catalog does not have to add up to exactly 100.
    pub weight: f64,
    // Display metadata. The engine never interprets these, they are passed
    // through to the renderer unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The prize carried by an outcome. Each variant carries only the fields
/// relevant to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reward {
    Xp { amount: u32 },
    Coins { amount: u32 },
    Item { name: String },
    Multiplier { factor: f64 },
    Chest { name: String },
}

impl Outcome {
    pub fn new(id: impl Into<String>, label: impl Into<String>, reward: Reward, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            reward,
            weight,
            color: None,
            icon: None,
        }
    }

    pub fn with_style(mut self, color: impl Into<String>, icon: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self.icon = Some(icon.into());
        self
    }
}
