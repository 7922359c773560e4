// File: src/services/donate/quota.rs

/// Why a run donates what it donates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuotaStatus {
    /// Today's target is already reached.
    AlreadyMet,
    /// No whole coin left to give.
    InsufficientBalance,
    /// The balance covers fewer coins than the target still asks for.
    Clamped { wanted: u32, needed: u32 },
    Needed(u32),
}

impl QuotaStatus {
    pub fn needed(&self) -> u32 {
        match *self {
            QuotaStatus::AlreadyMet | QuotaStatus::InsufficientBalance => 0,
            QuotaStatus::Clamped { needed, .. } => needed,
            QuotaStatus::Needed(n) => n,
        }
    }
}

/// Inputs to the daily quota decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaState {
    pub configured_target: u32,
    /// Platform maximum applied on top of the configured target.
    pub hard_cap: u32,
    pub already_done: u32,
    /// Coin balance, when known.
    pub available: Option<f64>,
}

impl QuotaState {
    pub fn new(configured_target: u32, hard_cap: u32, already_done: u32) -> Self {
        Self {
            configured_target,
            hard_cap,
            already_done,
            available: None,
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.available = Some(balance);
        self
    }

    pub fn target(&self) -> u32 {
        self.configured_target.min(self.hard_cap)
    }

    /// Units still owed today, ignoring the balance.
    pub fn remaining(&self) -> u32 {
        self.target().saturating_sub(self.already_done)
    }

    pub fn status(&self) -> QuotaStatus {
        let raw = self.remaining();
        if raw == 0 {
            return QuotaStatus::AlreadyMet;
        }

        let Some(balance) = self.available else {
            return QuotaStatus::Needed(raw);
        };
        // NaN falls through here as well.
        if !(balance > 0.0) {
            return QuotaStatus::InsufficientBalance;
        }
        if balance < raw as f64 {
            let needed = balance.floor() as u32;
            if needed == 0 {
                return QuotaStatus::InsufficientBalance;
            }
            return QuotaStatus::Clamped { wanted: raw, needed };
        }
        QuotaStatus::Needed(raw)
    }

    pub fn needed(&self) -> u32 {
        self.status().needed()
    }
}

/// Number of donation units still owed, bounded by `min(configured_target,
/// hard_cap)` and by the whole coins in `current_balance`.
pub fn compute_needed(
    configured_target: u32,
    hard_cap: u32,
    already_donated: u32,
    current_balance: f64,
) -> u32 {
    QuotaState::new(configured_target, hard_cap, already_donated)
        .with_balance(current_balance)
        .needed()
}
