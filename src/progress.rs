//! Durable player progress
//!
//! The one piece of state that outlives a session: grade level, cumulative
//! score, lives, and the sword collection. Gameplay never writes it directly;
//! the engine emits [`ProgressDelta`] values and [`NinjaProgress::merge`]
//! applies them, clamping everything back into range. Persisted to
//! LocalStorage on wasm builds.

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_THRESHOLD_STEP, MAX_LEVEL, MAX_LIVES, MIN_LEVEL};

/// Sword identity, stable across save files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwordId {
    Default,
    Diamond,
    Fire,
}

/// Streak milestones unlock swords in this order
pub const UNLOCK_ORDER: [SwordId; 2] = [SwordId::Diamond, SwordId::Fire];

impl SwordId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwordId::Default => "default",
            SwordId::Diamond => "diamond",
            SwordId::Fire => "fire",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "default" => Some(SwordId::Default),
            "diamond" => Some(SwordId::Diamond),
            "fire" => Some(SwordId::Fire),
            _ => None,
        }
    }

    /// Name shown in unlock feedback and the dashboard armory
    pub fn display_name(&self) -> &'static str {
        match self {
            SwordId::Default => "Basic Sword",
            SwordId::Diamond => "Diamond Sword",
            SwordId::Fire => "Fire Sword",
        }
    }
}

/// Partial progress update emitted by the scoring ledger.
///
/// Only the fields a given event touches are set; everything else stays
/// untouched on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub level: Option<u8>,
    pub cumulative_score: Option<u32>,
    pub high_score: Option<u32>,
    pub total_rounds: Option<u32>,
    pub lives: Option<u8>,
    pub last_life_lost_ms: Option<f64>,
    pub unlock_sword: Option<SwordId>,
    pub equip_sword: Option<SwordId>,
}

impl ProgressDelta {
    pub fn is_empty(&self) -> bool {
        *self == ProgressDelta::default()
    }
}

/// The durable player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NinjaProgress {
    /// Grade level 1-12, selects the question domain
    pub level: u8,
    /// Score banked across all sessions
    pub cumulative_score: u32,
    /// Best cumulative score ever reached
    pub high_score: u32,
    /// Quiz rounds answered correctly, lifetime
    pub total_rounds: u32,
    /// Remaining lives, 0 through [`MAX_LIVES`]
    pub lives: u8,
    /// Wall-clock ms of the most recent life loss
    pub last_life_lost_ms: Option<f64>,
    /// Owned swords in unlock order; only ever grows
    pub unlocked_swords: Vec<SwordId>,
    pub equipped_sword: SwordId,
}

impl Default for NinjaProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl NinjaProgress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "math_ninja_progress";

    /// First-entry record: grade 1, full lives, basic sword
    pub fn new() -> Self {
        Self {
            level: MIN_LEVEL,
            cumulative_score: 0,
            high_score: 0,
            total_rounds: 0,
            lives: MAX_LIVES,
            last_life_lost_ms: None,
            unlocked_swords: vec![SwordId::Default],
            equipped_sword: SwordId::Default,
        }
    }

    pub fn is_unlocked(&self, sword: SwordId) -> bool {
        self.unlocked_swords.contains(&sword)
    }

    /// First milestone sword not yet owned
    pub fn next_locked_sword(&self) -> Option<SwordId> {
        UNLOCK_ORDER.iter().copied().find(|s| !self.is_unlocked(*s))
    }

    /// Cumulative score required to leave the current level
    pub fn level_threshold(&self) -> u32 {
        self.level as u32 * LEVEL_THRESHOLD_STEP
    }

    /// Whether the dashboard's level-up action would do anything
    pub fn can_level_up(&self) -> bool {
        self.level < MAX_LEVEL && self.cumulative_score >= self.level_threshold()
    }

    /// Apply a partial update, clamping each field into its legal range.
    ///
    /// Unlocks are idempotent and equips of locked swords are dropped, so
    /// replaying a delta stream cannot corrupt the record.
    pub fn merge(&mut self, delta: &ProgressDelta) {
        if let Some(level) = delta.level {
            self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        }
        if let Some(score) = delta.cumulative_score {
            self.cumulative_score = score;
        }
        if let Some(high) = delta.high_score {
            // High score never regresses
            self.high_score = self.high_score.max(high);
        }
        if let Some(rounds) = delta.total_rounds {
            self.total_rounds = rounds;
        }
        if let Some(lives) = delta.lives {
            self.lives = lives.min(MAX_LIVES);
        }
        if let Some(ts) = delta.last_life_lost_ms {
            self.last_life_lost_ms = Some(ts);
        }
        if let Some(sword) = delta.unlock_sword {
            if !self.is_unlocked(sword) {
                self.unlocked_swords.push(sword);
            }
        }
        if let Some(sword) = delta.equip_sword {
            if self.is_unlocked(sword) {
                self.equipped_sword = sword;
            }
        }
    }

    /// Repair a record that arrived from outside (storage, host) so the
    /// engine can trust its invariants.
    pub fn normalize(&mut self) {
        self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.lives = self.lives.min(MAX_LIVES);
        if !self.is_unlocked(SwordId::Default) {
            self.unlocked_swords.insert(0, SwordId::Default);
        }
        if !self.is_unlocked(self.equipped_sword) {
            self.equipped_sword = SwordId::Default;
        }
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut progress) = serde_json::from_str::<NinjaProgress>(&json) {
                    progress.normalize();
                    log::info!(
                        "Loaded progress: grade {}, {} lives",
                        progress.level,
                        progress.lives
                    );
                    return progress;
                }
                log::warn!("Stored progress unreadable, starting fresh");
            }
        }

        log::info!("No saved progress found, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved (score {})", self.cumulative_score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_record() {
        let p = NinjaProgress::new();
        assert_eq!(p.level, 1);
        assert_eq!(p.lives, MAX_LIVES);
        assert_eq!(p.cumulative_score, 0);
        assert_eq!(p.unlocked_swords, vec![SwordId::Default]);
        assert_eq!(p.equipped_sword, SwordId::Default);
        assert!(p.last_life_lost_ms.is_none());
    }

    #[test]
    fn test_merge_clamps_level_and_lives() {
        let mut p = NinjaProgress::new();
        p.merge(&ProgressDelta {
            level: Some(40),
            lives: Some(9),
            ..Default::default()
        });
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(p.lives, MAX_LIVES);

        p.merge(&ProgressDelta {
            level: Some(0),
            ..Default::default()
        });
        assert_eq!(p.level, MIN_LEVEL);
    }

    #[test]
    fn test_high_score_never_regresses() {
        let mut p = NinjaProgress::new();
        p.merge(&ProgressDelta {
            high_score: Some(500),
            ..Default::default()
        });
        p.merge(&ProgressDelta {
            high_score: Some(200),
            ..Default::default()
        });
        assert_eq!(p.high_score, 500);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut p = NinjaProgress::new();
        let delta = ProgressDelta {
            unlock_sword: Some(SwordId::Diamond),
            ..Default::default()
        };
        p.merge(&delta);
        p.merge(&delta);
        assert_eq!(
            p.unlocked_swords,
            vec![SwordId::Default, SwordId::Diamond]
        );
    }

    #[test]
    fn test_equip_requires_unlock() {
        let mut p = NinjaProgress::new();
        p.merge(&ProgressDelta {
            equip_sword: Some(SwordId::Fire),
            ..Default::default()
        });
        assert_eq!(p.equipped_sword, SwordId::Default);

        p.merge(&ProgressDelta {
            unlock_sword: Some(SwordId::Fire),
            equip_sword: Some(SwordId::Fire),
            ..Default::default()
        });
        assert_eq!(p.equipped_sword, SwordId::Fire);
    }

    #[test]
    fn test_next_locked_sword_order() {
        let mut p = NinjaProgress::new();
        assert_eq!(p.next_locked_sword(), Some(SwordId::Diamond));
        p.merge(&ProgressDelta {
            unlock_sword: Some(SwordId::Diamond),
            ..Default::default()
        });
        assert_eq!(p.next_locked_sword(), Some(SwordId::Fire));
        p.merge(&ProgressDelta {
            unlock_sword: Some(SwordId::Fire),
            ..Default::default()
        });
        assert_eq!(p.next_locked_sword(), None);
    }

    #[test]
    fn test_level_up_gate() {
        let mut p = NinjaProgress::new();
        assert!(!p.can_level_up());

        p.cumulative_score = 999;
        assert!(!p.can_level_up());

        p.cumulative_score = 1000;
        assert!(p.can_level_up());

        // Threshold scales with level
        p.level = 5;
        p.cumulative_score = 4999;
        assert!(!p.can_level_up());
        p.cumulative_score = 5000;
        assert!(p.can_level_up());

        // Capped at the top grade no matter the score
        p.level = MAX_LEVEL;
        p.cumulative_score = 1_000_000;
        assert!(!p.can_level_up());
    }

    #[test]
    fn test_normalize_repairs_bad_record() {
        let mut p = NinjaProgress {
            level: 99,
            lives: 200,
            unlocked_swords: vec![],
            equipped_sword: SwordId::Fire,
            ..NinjaProgress::new()
        };
        p.normalize();
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(p.lives, MAX_LIVES);
        assert!(p.is_unlocked(SwordId::Default));
        assert_eq!(p.equipped_sword, SwordId::Default);
    }

    #[test]
    fn test_sword_id_save_format() {
        // Save files spell sword ids in lowercase
        assert_eq!(
            serde_json::to_string(&SwordId::Diamond).unwrap(),
            "\"diamond\""
        );
        assert_eq!(SwordId::from_str("fire"), Some(SwordId::Fire));
        assert_eq!(SwordId::from_str("excalibur"), None);
        for sword in [SwordId::Default, SwordId::Diamond, SwordId::Fire] {
            assert_eq!(SwordId::from_str(sword.as_str()), Some(sword));
        }
    }

    fn sword_strategy() -> impl Strategy<Value = SwordId> {
        prop_oneof![
            Just(SwordId::Default),
            Just(SwordId::Diamond),
            Just(SwordId::Fire),
        ]
    }

    fn delta_strategy() -> impl Strategy<Value = ProgressDelta> {
        (
            proptest::option::of(0u8..=60),
            proptest::option::of(any::<u32>()),
            proptest::option::of(any::<u32>()),
            proptest::option::of(any::<u32>()),
            proptest::option::of(0u8..=20),
            proptest::option::of(0.0f64..2.0e12),
            proptest::option::of(sword_strategy()),
            proptest::option::of(sword_strategy()),
        )
            .prop_map(
                |(
                    level,
                    cumulative_score,
                    high_score,
                    total_rounds,
                    lives,
                    last_life_lost_ms,
                    unlock_sword,
                    equip_sword,
                )| ProgressDelta {
                    level,
                    cumulative_score,
                    high_score,
                    total_rounds,
                    lives,
                    last_life_lost_ms,
                    unlock_sword,
                    equip_sword,
                },
            )
    }

    proptest! {
        /// No delta stream can push the record out of its legal ranges.
        #[test]
        fn test_merge_preserves_invariants(deltas in prop::collection::vec(delta_strategy(), 0..40)) {
            let mut p = NinjaProgress::new();
            let mut high_seen = 0u32;
            let mut unlocked_seen = 1usize;
            for delta in &deltas {
                p.merge(delta);
                prop_assert!(p.lives <= MAX_LIVES);
                prop_assert!((MIN_LEVEL..=MAX_LEVEL).contains(&p.level));
                prop_assert!(p.high_score >= high_seen);
                prop_assert!(p.unlocked_swords.len() >= unlocked_seen);
                prop_assert!(p.is_unlocked(p.equipped_sword));
                high_seen = p.high_score;
                unlocked_seen = p.unlocked_swords.len();
            }
        }
    }
}
