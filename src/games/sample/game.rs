//! Sample game setup.

use super::cards::{sample_cards, MAX_AGE};
use super::effects::sample_registry;
use crate::cards::CardDatabase;
use crate::core::{EngineConfig, EngineError, GameRng, Snapshot};
use crate::effects::{EffectRegistry, Executor};
use crate::zones::Supply;

/// Card data, effect table and configuration of the sample set.
#[derive(Clone, Debug)]
pub struct SampleGame {
    db: CardDatabase,
    registry: EffectRegistry,
    config: EngineConfig,
}

impl SampleGame {
    #[must_use]
    pub fn db(&self) -> &CardDatabase {
        &self.db
    }

    #[must_use]
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// An executor over this game's tables.
    #[must_use]
    pub fn executor(&self) -> Executor<'_> {
        Executor::new(&self.registry, &self.db, &self.config)
    }

    /// Opening snapshot with a freshly shuffled supply.
    #[must_use]
    pub fn opening(&self, seed: u64) -> Snapshot {
        let mut rng = GameRng::new(seed);
        Snapshot::new(self.config.player_count, Supply::shuffled(&self.db, &mut rng))
    }

    /// Opening snapshot with every pile in card id order (highest id on
    /// top), for tests that trace draws by hand.
    #[must_use]
    pub fn ordered_opening(&self) -> Snapshot {
        let mut ages: Vec<_> = self.db.iter().map(|card| card.age).collect();
        ages.sort_unstable();
        ages.dedup();
        let supply = Supply::from_piles(ages.into_iter().map(|age| (age, self.db.ids_of_age(age))));
        Snapshot::new(self.config.player_count, supply)
    }
}

/// Builder for creating a SampleGame.
#[derive(Clone, Debug)]
pub struct SampleGameBuilder {
    config: EngineConfig,
}

impl Default for SampleGameBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::new(2).with_max_age(MAX_AGE),
        }
    }
}

impl SampleGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    #[must_use]
    pub fn max_continue_steps(mut self, steps: u32) -> Self {
        self.config.max_continue_steps = steps;
        self
    }

    #[must_use]
    pub fn choice_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.choice_timeout = Some(timeout);
        self
    }

    /// Build and validate the tables.
    pub fn build(self) -> Result<SampleGame, EngineError> {
        self.config.validate()?;
        let db = CardDatabase::from_cards(sample_cards())?;
        let registry = sample_registry()?;
        registry.validate(&db)?;
        Ok(SampleGame {
            db,
            registry,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Age;
    use crate::games::sample::{OPTICS, THE_WHEEL};

    #[test]
    fn test_build() {
        let game = SampleGameBuilder::new().player_count(3).build().unwrap();

        assert_eq!(game.db().len(), 15);
        assert_eq!(game.config().max_age, 3);
        assert_eq!(game.opening(1).player_count(), 3);
    }

    #[test]
    fn test_invalid_player_count() {
        assert!(matches!(
            SampleGameBuilder::new().player_count(0).build(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_openings() {
        let game = SampleGameBuilder::new().build().unwrap();

        let ordered = game.ordered_opening();
        assert_eq!(ordered.supply().pile(Age::new(1)).last(), Some(THE_WHEEL));
        assert_eq!(ordered.supply().pile(Age::new(3)).last(), Some(OPTICS));

        let a = game.opening(9);
        assert_eq!(a, game.opening(9));
        assert_eq!(a.supply().total(), 15);
        assert!(a.card_census().values().all(|&n| n == 1));
    }
}
