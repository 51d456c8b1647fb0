use engine::Reward;
use tracing::info;

/// In-memory balances for the demo player. The engine decides what was won;
/// crediting it is strictly the host's job, and happens only after the
/// result has been acknowledged.
#[derive(Debug)]
pub struct Ledger {
    pub xp: u64,
    pub coins: u64,
    pub multiplier: f64,
    pub items: Vec<String>,
    pub chests: Vec<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            xp: 0,
            coins: 0,
            multiplier: 1.0,
            items: Vec::new(),
            chests: Vec::new(),
        }
    }

    pub fn credit(&mut self, reward: &Reward) {
        match reward {
            Reward::Xp { amount } => {
                self.xp += u64::from(*amount);
                info!("⭐ credited {} xp", amount);
            }
            Reward::Coins { amount } => {
                self.coins += u64::from(*amount);
                info!("🪙 credited {} coins", amount);
            }
            Reward::Item { name } => {
                info!("🎁 added '{}' to the inventory", name);
                self.items.push(name.clone());
            }
            Reward::Multiplier { factor } => {
                self.multiplier *= factor;
                info!("⚡ boost is now x{:.1}", self.multiplier);
            }
            Reward::Chest { name } => {
                info!("🧰 stored '{}'", name);
                self.chests.push(name.clone());
            }
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} xp, {} coins, x{:.1} boost, {} items, {} chests",
            self.xp,
            self.coins,
            self.multiplier,
            self.items.len(),
            self.chests.len(),
        )
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_each_reward_kind() {
        let mut ledger = Ledger::new();
        ledger.credit(&Reward::Xp { amount: 50 });
        ledger.credit(&Reward::Coins { amount: 100 });
        ledger.credit(&Reward::Item { name: "Mystery Item".into() });
        ledger.credit(&Reward::Multiplier { factor: 2.0 });
        ledger.credit(&Reward::Chest { name: "Rare Chest".into() });

        assert_eq!(ledger.xp, 50);
        assert_eq!(ledger.coins, 100);
        assert_eq!(ledger.items, vec!["Mystery Item".to_string()]);
        assert_eq!(ledger.multiplier, 2.0);
        assert_eq!(ledger.chests, vec!["Rare Chest".to_string()]);
    }

    #[test]
    fn test_multipliers_stack() {
        let mut ledger = Ledger::new();
        ledger.credit(&Reward::Multiplier { factor: 2.0 });
        ledger.credit(&Reward::Multiplier { factor: 1.5 });
        assert_eq!(ledger.multiplier, 3.0);
    }
}
