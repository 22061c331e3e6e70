//! Application state and composition.

use std::sync::Arc;

use raidledger_domain::RaidSettings;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{
        BotDetailCachePort, BotGenerationPort, ChatResponsePort, ClockPort, ItemCatalog,
        LocationCatalog, NotificationPort, ProfileFixerPort, QuestCatalog, RandomPort,
        TraderCatalog,
    },
};
use crate::stores::ProfileStore;
use crate::use_cases;
use crate::use_cases::raid::{
    DeathPenaltyEngine, InsuranceLedger, InventoryReconciler, QuoteInsurance, RegenerateScav,
    ResolveRaidOutcome, ScavKarmaEngine,
};

/// Main application state.
///
/// Holds the profile store, the game data it reads and the use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub settings: Arc<RaidSettings>,
}

/// Game data catalogs and the authoritative profile store.
pub struct Repositories {
    pub profiles: Arc<ProfileStore>,
    pub items: Arc<dyn ItemCatalog>,
    pub traders: Arc<dyn TraderCatalog>,
    pub locations: Arc<dyn LocationCatalog>,
    pub quests: Arc<dyn QuestCatalog>,
}

/// Subsystems owned elsewhere that raid resolution calls into.
pub struct Collaborators {
    pub bots: Arc<dyn BotGenerationPort>,
    pub bot_cache: Arc<dyn BotDetailCachePort>,
    pub fixer: Arc<dyn ProfileFixerPort>,
    pub notifications: Arc<dyn NotificationPort>,
    pub chat: Arc<dyn ChatResponsePort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub raid: use_cases::RaidUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repositories: Repositories,
        collaborators: Collaborators,
        settings: Arc<RaidSettings>,
    ) -> Self {
        Self::with_clock(
            repositories,
            collaborators,
            settings,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
    }

    pub fn with_clock(
        repositories: Repositories,
        collaborators: Collaborators,
        settings: Arc<RaidSettings>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let reconciler = Arc::new(InventoryReconciler::new(
            repositories.items.clone(),
            collaborators.fixer.clone(),
            clock.clone(),
            random.clone(),
            settings.clone(),
        ));
        let penalties = Arc::new(DeathPenaltyEngine::new(
            repositories.quests.clone(),
            settings.clone(),
        ));
        let insurance = Arc::new(InsuranceLedger::new(
            repositories.traders.clone(),
            repositories.items.clone(),
            collaborators.notifications.clone(),
            clock.clone(),
            random.clone(),
            settings.clone(),
        ));
        let karma = Arc::new(ScavKarmaEngine::new(
            collaborators.bots.clone(),
            random,
            clock.clone(),
            settings.clone(),
        ));

        let raid = use_cases::RaidUseCases::new(
            Arc::new(ResolveRaidOutcome::new(
                repositories.profiles.clone(),
                reconciler,
                penalties,
                insurance.clone(),
                karma.clone(),
                repositories.locations.clone(),
                collaborators.chat.clone(),
                collaborators.bot_cache.clone(),
                clock,
                settings.clone(),
            )),
            Arc::new(QuoteInsurance::new(
                repositories.profiles.clone(),
                insurance,
            )),
            Arc::new(RegenerateScav::new(repositories.profiles.clone(), karma)),
        );

        Self {
            repositories,
            use_cases: UseCases { raid },
            settings,
        }
    }
}
