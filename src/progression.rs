//! Session score and the durable player profile
//!
//! The profile is only mutated through [`Progression`]. It is loaded once at
//! startup and saved once at shutdown; there is no autosave, so progress since
//! the last clean exit is lost on a crash.

use serde::{Deserialize, Serialize};

use crate::persistence::ProfileStore;

/// A cosmetic variant of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub id: &'static str,
    pub label: &'static str,
}

/// Variant catalog, in persisted order. The first entry is free and always owned.
pub const VARIANTS: [Variant; 3] = [
    Variant {
        id: "yellow",
        label: "Yellow",
    },
    Variant {
        id: "blue",
        label: "Blue",
    },
    Variant {
        id: "red",
        label: "Red",
    },
];

pub const DEFAULT_VARIANT: &str = VARIANTS[0].id;

/// Catalog index of a variant id
pub fn variant_index(id: &str) -> Option<usize> {
    VARIANTS.iter().position(|v| v.id == id)
}

/// Durable progression data
///
/// Field order is the persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub high_score: u32,
    pub currency: u32,
    pub selected_variant: String,
    /// One flag per catalog entry
    pub owned_variants: Vec<bool>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        let mut owned_variants = vec![false; VARIANTS.len()];
        owned_variants[0] = true;
        Self {
            high_score: 0,
            currency: 0,
            selected_variant: DEFAULT_VARIANT.to_string(),
            owned_variants,
        }
    }
}

impl PlayerProfile {
    pub fn owns(&self, index: usize) -> bool {
        self.owned_variants.get(index).copied().unwrap_or(false)
    }

    /// Repair a loaded profile so it matches the current catalog
    pub fn sanitized(mut self) -> Self {
        if self.owned_variants.len() != VARIANTS.len() {
            log::warn!(
                "profile has {} variant flags, catalog has {}; resizing",
                self.owned_variants.len(),
                VARIANTS.len()
            );
            self.owned_variants.resize(VARIANTS.len(), false);
        }
        self.owned_variants[0] = true;

        let selected_ok = variant_index(&self.selected_variant).is_some_and(|i| self.owns(i));
        if !selected_ok {
            log::warn!(
                "selected variant {:?} is not owned, falling back to {}",
                self.selected_variant,
                DEFAULT_VARIANT
            );
            self.selected_variant = DEFAULT_VARIANT.to_string();
        }
        self
    }
}

/// Load the profile, falling back to a fresh one on any problem
pub fn load_or_default(store: &dyn ProfileStore) -> PlayerProfile {
    match store.load() {
        Ok(Some(profile)) => {
            log::info!(
                "Loaded profile: high score {}, currency {}",
                profile.high_score,
                profile.currency
            );
            profile.sanitized()
        }
        Ok(None) => {
            log::info!("No profile found, starting fresh");
            PlayerProfile::default()
        }
        Err(e) => {
            log::warn!("Profile unreadable ({e}), starting fresh");
            PlayerProfile::default()
        }
    }
}

/// Outcome of a death's high-score comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub previous_high: u32,
    pub new_high_score: bool,
}

/// Result of choosing a variant in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    /// Unowned and affordable: paid and now owned
    Purchased { index: usize, price: u32 },
    /// Already owned: now the active variant
    Selected { index: usize },
    /// Unowned and unaffordable: nothing changed
    Unaffordable { index: usize, price: u32 },
    /// Not a catalog entry
    Unknown,
}

/// Session score plus the durable profile
#[derive(Debug, Clone)]
pub struct Progression {
    session_score: u32,
    profile: PlayerProfile,
}

impl Progression {
    /// Wrap a profile, repairing it against the catalog first
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            session_score: 0,
            profile: profile.sanitized(),
        }
    }

    pub fn session_score(&self) -> u32 {
        self.session_score
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn selected_variant(&self) -> &str {
        &self.profile.selected_variant
    }

    pub fn start_session(&mut self) {
        self.session_score = 0;
    }

    /// One obstacle passed
    pub fn record_pass(&mut self) {
        self.session_score = self.session_score.saturating_add(1);
    }

    /// One bonus coin collected
    pub fn record_bonus(&mut self) {
        self.profile.currency = self.profile.currency.saturating_add(1);
    }

    /// Compare against the high score (strictly greater wins) and reset for the next session
    pub fn finish_session(&mut self) -> SessionSummary {
        let score = self.session_score;
        let previous_high = self.profile.high_score;
        let new_high_score = score > previous_high;
        if new_high_score {
            self.profile.high_score = score;
        }
        self.session_score = 0;
        SessionSummary {
            score,
            previous_high,
            new_high_score,
        }
    }

    /// Buy or select the variant at `index`
    pub fn choose_variant(&mut self, index: usize, price: u32) -> ShopOutcome {
        let Some(variant) = VARIANTS.get(index) else {
            return ShopOutcome::Unknown;
        };
        if self.profile.owns(index) {
            self.profile.selected_variant = variant.id.to_string();
            return ShopOutcome::Selected { index };
        }
        if self.profile.currency < price {
            return ShopOutcome::Unaffordable { index, price };
        }
        let Some(owned) = self.profile.owned_variants.get_mut(index) else {
            return ShopOutcome::Unknown;
        };
        *owned = true;
        self.profile.currency -= price;
        ShopOutcome::Purchased { index, price }
    }

    /// Persist the profile (called once at shutdown)
    pub fn save(&self, store: &dyn ProfileStore) -> crate::Result<()> {
        store.save(&self.profile)?;
        log::info!(
            "Profile saved: high score {}, currency {}",
            self.profile.high_score,
            self.profile.currency
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn with_currency(currency: u32) -> Progression {
        Progression::new(PlayerProfile {
            currency,
            ..Default::default()
        })
    }

    #[test]
    fn test_default_profile() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.high_score, 0);
        assert_eq!(profile.currency, 0);
        assert_eq!(profile.selected_variant, "yellow");
        assert_eq!(profile.owned_variants, vec![true, false, false]);
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut progression = Progression::new(PlayerProfile {
            high_score: 5,
            ..Default::default()
        });
        for _ in 0..7 {
            progression.record_pass();
        }
        let summary = progression.finish_session();
        assert_eq!(summary.score, 7);
        assert!(summary.new_high_score);
        assert_eq!(progression.profile().high_score, 7);
        assert_eq!(progression.session_score(), 0);

        progression.record_pass();
        let summary = progression.finish_session();
        assert!(!summary.new_high_score);
        assert_eq!(progression.profile().high_score, 7);
    }

    #[test]
    fn test_equal_score_is_not_a_new_high() {
        let mut progression = Progression::new(PlayerProfile {
            high_score: 3,
            ..Default::default()
        });
        for _ in 0..3 {
            progression.record_pass();
        }
        assert!(!progression.finish_session().new_high_score);
    }

    #[test]
    fn test_purchase_affordable() {
        let mut progression = with_currency(300);
        assert_eq!(
            progression.choose_variant(1, 250),
            ShopOutcome::Purchased { index: 1, price: 250 }
        );
        assert_eq!(progression.profile().currency, 50);
        assert!(progression.profile().owns(1));
        // Buying does not switch the active variant
        assert_eq!(progression.selected_variant(), "yellow");
    }

    #[test]
    fn test_purchase_unaffordable() {
        let mut progression = with_currency(100);
        let before = progression.profile().clone();
        assert_eq!(
            progression.choose_variant(2, 250),
            ShopOutcome::Unaffordable { index: 2, price: 250 }
        );
        assert_eq!(progression.profile(), &before);
    }

    #[test]
    fn test_select_owned() {
        let mut progression = with_currency(250);
        progression.choose_variant(2, 250);
        assert_eq!(progression.choose_variant(2, 250), ShopOutcome::Selected { index: 2 });
        assert_eq!(progression.selected_variant(), "red");
        assert_eq!(progression.profile().currency, 0);
    }

    #[test]
    fn test_unknown_variant() {
        let mut progression = with_currency(1000);
        assert_eq!(progression.choose_variant(9, 250), ShopOutcome::Unknown);
    }

    #[test]
    fn test_short_flag_list_is_repaired_on_construction() {
        let mut progression = Progression::new(PlayerProfile {
            currency: 300,
            owned_variants: vec![true],
            ..Default::default()
        });
        assert_eq!(progression.profile().owned_variants.len(), VARIANTS.len());
        assert_eq!(
            progression.choose_variant(1, 250),
            ShopOutcome::Purchased { index: 1, price: 250 }
        );
        assert!(progression.profile().owns(1));
    }

    #[test]
    fn test_sanitize_repairs_profile() {
        let profile = PlayerProfile {
            high_score: 4,
            currency: 9,
            selected_variant: "red".into(),
            owned_variants: vec![false],
        }
        .sanitized();
        assert_eq!(profile.owned_variants, vec![true, false, false]);
        assert_eq!(profile.selected_variant, "yellow");
        assert_eq!(profile.high_score, 4);
    }

    #[test]
    fn test_load_or_default_first_run() {
        let store = MemoryStore::default();
        assert_eq!(load_or_default(&store), PlayerProfile::default());
    }

    #[test]
    fn test_load_or_default_corrupt() {
        let store = MemoryStore::with_bytes(vec![0xff, 0x01]);
        assert_eq!(load_or_default(&store), PlayerProfile::default());
    }

    proptest! {
        #[test]
        fn prop_currency_never_negative(start in 0u32..1000, picks in proptest::collection::vec(0usize..3, 0..20)) {
            let mut progression = with_currency(start);
            for index in picks {
                let before = progression.profile().currency;
                match progression.choose_variant(index, 250) {
                    ShopOutcome::Purchased { price, .. } => {
                        prop_assert!(before >= price);
                        prop_assert_eq!(progression.profile().currency, before - price);
                    }
                    _ => prop_assert_eq!(progression.profile().currency, before),
                }
            }
        }

        #[test]
        fn prop_one_coin_per_bonus(n in 0u32..500) {
            let mut progression = with_currency(0);
            for _ in 0..n {
                progression.record_bonus();
            }
            prop_assert_eq!(progression.profile().currency, n);
        }
    }
}
