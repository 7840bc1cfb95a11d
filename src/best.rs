//! Best-score persistence
//!
//! A single scalar in LocalStorage, written only when beaten. The key and
//! bare-number format are shared with earlier releases of the game, so
//! existing bests survive.

/// Stored best score plus the strictly-greater update rule
#[derive(Debug, Clone, Default)]
pub struct BestScore {
    best: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "taptap_best";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished round. Returns true iff `score` strictly beats the
    /// stored best; only then is anything persisted.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the stored best from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.parse::<u32>() {
                    log::info!("Loaded best score: {}", best);
                    return Self { best };
                }
            }
        }

        log::info!("No stored best score, starting fresh");
        Self::new()
    }

    /// Save the best to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("Best score saved: {}", self.best);
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

/// Rank message for the game-over overlay
pub fn rank_message(score: u32) -> &'static str {
    match score {
        0..=4 => "ROOKIE",
        5..=9 => "STEADY HANDS",
        10..=14 => "SHARP EYES",
        15..=24 => "RELENTLESS",
        _ => "TAP LEGEND",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_on_strict_improvement() {
        let mut best = BestScore { best: 7 };
        // Equal score: no write
        assert!(!best.record(7));
        assert_eq!(best.best(), 7);
        // Lower score: no write
        assert!(!best.record(3));
        assert_eq!(best.best(), 7);
        // Strictly greater: write
        assert!(best.record(8));
        assert_eq!(best.best(), 8);
    }

    #[test]
    fn test_record_from_empty() {
        let mut best = BestScore::new();
        // A zero-score round is not an improvement over nothing
        assert!(!best.record(0));
        assert!(best.record(1));
        assert_eq!(best.best(), 1);
    }

    #[test]
    fn test_rank_tiers() {
        assert_eq!(rank_message(0), "ROOKIE");
        assert_eq!(rank_message(4), "ROOKIE");
        assert_eq!(rank_message(5), "STEADY HANDS");
        assert_eq!(rank_message(12), "SHARP EYES");
        assert_eq!(rank_message(20), "RELENTLESS");
        assert_eq!(rank_message(40), "TAP LEGEND");
    }
}
