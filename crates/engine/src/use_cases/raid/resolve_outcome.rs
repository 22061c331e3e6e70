//! Resolve a raid outcome use case.
//!
//! Applies what the client reports at the end of a raid to the authoritative
//! profile and persists it. PMC and scav raids take different paths.

use std::collections::HashSet;
use std::sync::Arc;

use raidledger_domain::common::unix_seconds;
use raidledger_domain::{
    CharacterKind, ExitStatus, Profile, RaidOutcomeRequest, RaidSettings, SessionId, Victim,
    USEC_RAID_REMAIN_KILLS,
};

use crate::infrastructure::ports::{
    BotDetailCachePort, ChatResponsePort, ClockPort, LocationCatalog, LocationInfo,
};
use crate::stores::ProfileStore;

use super::death_penalty::DeathPenaltyEngine;
use super::error::RaidError;
use super::insurance::InsuranceLedger;
use super::reconcile_inventory::InventoryReconciler;
use super::scav_karma::ScavKarmaEngine;
use super::types::RaidResolution;

const LIGHTHOUSE_LOCATION: &str = "lighthouse";

/// The map a raid took place on, captured before the profile forgets it.
struct RaidLocation {
    name: Option<String>,
    info: Option<LocationInfo>,
}

impl RaidLocation {
    fn insurance_enabled(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.insurance_enabled)
    }

    fn is(&self, location: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(location))
    }

    fn label(&self) -> &str {
        self.info
            .as_ref()
            .map(|info| info.id.as_str())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// What a resolution changed, before the profile is saved.
struct Applied {
    character: CharacterKind,
    exit: ExitStatus,
    died: bool,
    insurance_records: usize,
    fence_standing: Option<f64>,
    scav_regenerated: bool,
}

pub struct ResolveRaidOutcome {
    store: Arc<ProfileStore>,
    reconciler: Arc<InventoryReconciler>,
    penalties: Arc<DeathPenaltyEngine>,
    insurance: Arc<InsuranceLedger>,
    karma: Arc<ScavKarmaEngine>,
    locations: Arc<dyn LocationCatalog>,
    chat: Arc<dyn ChatResponsePort>,
    bot_cache: Arc<dyn BotDetailCachePort>,
    clock: Arc<dyn ClockPort>,
    settings: Arc<RaidSettings>,
}

impl ResolveRaidOutcome {
    pub fn new(
        store: Arc<ProfileStore>,
        reconciler: Arc<InventoryReconciler>,
        penalties: Arc<DeathPenaltyEngine>,
        insurance: Arc<InsuranceLedger>,
        karma: Arc<ScavKarmaEngine>,
        locations: Arc<dyn LocationCatalog>,
        chat: Arc<dyn ChatResponsePort>,
        bot_cache: Arc<dyn BotDetailCachePort>,
        clock: Arc<dyn ClockPort>,
        settings: Arc<RaidSettings>,
    ) -> Self {
        Self {
            store,
            reconciler,
            penalties,
            insurance,
            karma,
            locations,
            chat,
            bot_cache,
            clock,
            settings,
        }
    }

    /// Applies the raid outcome to the session's profile and saves it.
    ///
    /// The session's profile stays locked for the whole resolution, so
    /// outcomes submitted concurrently for one session apply one at a time.
    /// The outcome is applied to a working copy that replaces the stored
    /// profile only once every step has succeeded.
    pub async fn execute(
        &self,
        session_id: &SessionId,
        request: RaidOutcomeRequest,
    ) -> Result<RaidResolution, RaidError> {
        let mut guard = self
            .store
            .lock(session_id)
            .await
            .map_err(|e| RaidError::from_lookup(session_id, e))?;
        let profile: &mut Profile = &mut guard;

        tracing::info!(
            session_id = %session_id,
            exit = %request.exit,
            is_player_scav = request.is_player_scav,
            "Resolving raid outcome"
        );

        let mut working = profile.clone();
        let applied = if request.is_player_scav {
            self.resolve_scav(session_id, &mut working, request).await
        } else {
            self.resolve_pmc(session_id, &mut working, request).await
        };
        let applied = match applied {
            Ok(applied) => applied,
            Err(e) => {
                self.insurance.discard(session_id);
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Raid outcome rejected, profile left unchanged"
                );
                return Err(e);
            }
        };

        *profile = working;
        let saved = self.store.save_profile(profile).await?;
        tracing::info!(
            session_id = %session_id,
            exit = %applied.exit,
            character = ?applied.character,
            died = applied.died,
            insurance_records = applied.insurance_records,
            fence_standing = ?applied.fence_standing,
            "Raid outcome resolved"
        );

        Ok(RaidResolution {
            session_id: session_id.clone(),
            character: applied.character,
            exit: applied.exit,
            died: applied.died,
            insurance_records: applied.insurance_records,
            fence_standing: applied.fence_standing,
            scav_regenerated: applied.scav_regenerated,
            saved,
        })
    }

    async fn resolve_pmc(
        &self,
        session_id: &SessionId,
        profile: &mut Profile,
        mut request: RaidOutcomeRequest,
    ) -> Result<Applied, RaidError> {
        let location = self.raid_location(profile);
        let exit = request.exit;
        let died = exit.is_dead();

        let pre_raid_gear = profile.pmc().inventory.player_gear();
        let pre_raid_ids = profile.pmc().inventory.item_ids();
        profile.inraid.character = CharacterKind::Pmc;

        self.reconciler.merge_base_stats(
            profile,
            CharacterKind::Pmc,
            &mut request,
            location.info.as_ref(),
        )?;

        let snapshot = &mut request.profile;
        self.reconciler
            .mark_found_in_raid(snapshot, &pre_raid_ids, exit, false);
        self.reconciler
            .replace_ids(&mut snapshot.inventory, &profile.pmc().insured_items);
        self.reconciler
            .normalize_money_stacks(&mut snapshot.inventory.items);

        let pmc = profile.pmc_mut();
        self.reconciler.splice_inventory(pmc, &snapshot.inventory);
        if let Err(e) = pmc.inventory.check_integrity() {
            tracing::error!(session_id = %session_id, error = %e, "Inventory inconsistent after splice");
        }
        self.reconciler.save_vitality(pmc, &request.health);

        let insurance_enabled = location.insurance_enabled();
        if insurance_enabled {
            let forfeited = if died {
                self.penalties.items_lost_on_death(&profile.pmc().inventory)
            } else {
                HashSet::new()
            };
            self.insurance.store_lost_gear(
                session_id,
                profile.pmc_mut(),
                &request.profile.inventory,
                &pre_raid_gear,
                &forfeited,
            );
        } else if location.is(&self.settings.in_raid.laboratory_location) {
            self.insurance
                .send_lost_insurance_message(session_id, location.label())
                .await;
        }

        if location.is(LIGHTHOUSE_LOCATION) {
            decrement_usec_raid_counter(profile);
        }

        if died {
            let aggressor = request.profile.stats.eft.aggressor.clone();
            if let Err(e) = self
                .chat
                .send_killer_response(session_id, profile.pmc(), aggressor)
                .await
            {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to send killer response");
            }
            self.bot_cache.clear();
            self.penalties.apply(profile.pmc_mut(), exit);
        }

        let victims: Vec<Victim> = profile
            .pmc()
            .stats
            .eft
            .victims
            .iter()
            .filter(|victim| victim.is_pmc_bot())
            .cloned()
            .collect();
        if !victims.is_empty() {
            if let Err(e) = self
                .chat
                .send_victim_response(session_id, victims, profile.pmc())
                .await
            {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to send victim response");
            }
        }

        let insurance_records = if insurance_enabled {
            self.insurance
                .send_insured_items(session_id, profile, location.label())
                .await
        } else {
            0
        };

        Ok(Applied {
            character: CharacterKind::Pmc,
            exit,
            died,
            insurance_records,
            fence_standing: None,
            scav_regenerated: false,
        })
    }

    async fn resolve_scav(
        &self,
        session_id: &SessionId,
        profile: &mut Profile,
        mut request: RaidOutcomeRequest,
    ) -> Result<Applied, RaidError> {
        let location = self.raid_location(profile);
        let exit = request.exit;
        let died = exit.is_dead();

        if profile.characters.scav.is_none() {
            return Err(RaidError::ScavProfileMissing(session_id.clone()));
        }
        profile.inraid.character = CharacterKind::Scav;

        self.reconciler.merge_base_stats(
            profile,
            CharacterKind::Scav,
            &mut request,
            location.info.as_ref(),
        )?;
        if let Some(scav) = profile.characters.scav.as_ref() {
            self.reconciler
                .carry_over_scav_progress(&mut profile.characters.pmc, scav);
        }

        let snapshot = &mut request.profile;
        self.reconciler
            .mark_found_in_raid(snapshot, &HashSet::new(), exit, true);
        self.reconciler
            .replace_ids(&mut snapshot.inventory, &profile.pmc().insured_items);
        self.reconciler
            .normalize_money_stacks(&mut snapshot.inventory.items);

        let scav = profile
            .character_mut(CharacterKind::Scav)
            .ok_or_else(|| RaidError::ScavProfileMissing(session_id.clone()))?;
        self.reconciler.splice_inventory(scav, &snapshot.inventory);
        if let Err(e) = scav.inventory.check_integrity() {
            tracing::error!(session_id = %session_id, error = %e, "Scav inventory inconsistent after splice");
        }
        self.reconciler.reset_vitality(scav);

        let standing = self
            .karma
            .apply_kill_karma(profile, &request.profile.stats.eft.victims, exit);

        if died {
            self.karma.regenerate(session_id, profile)?;
        }
        profile.pmc_mut().info.last_time_played_as_savage = unix_seconds(self.clock.now());

        Ok(Applied {
            character: CharacterKind::Scav,
            exit,
            died,
            insurance_records: 0,
            fence_standing: Some(standing.value()),
            scav_regenerated: died,
        })
    }

    fn raid_location(&self, profile: &Profile) -> RaidLocation {
        let name = profile.raid_location();
        let info = name.as_deref().and_then(|name| {
            let info = self.locations.location(name);
            if info.is_none() {
                tracing::warn!(location = %name, "Unknown raid location, insurance disabled");
            }
            info
        });
        RaidLocation { name, info }
    }
}

fn decrement_usec_raid_counter(profile: &mut Profile) {
    let pmc = profile.pmc_mut();
    if !pmc.info.side.eq_ignore_ascii_case("usec") {
        return;
    }
    if let Some(counter) = pmc.stats.eft.overall_counters.find_mut(USEC_RAID_REMAIN_KILLS) {
        if counter.value > 0.0 {
            counter.value -= 1.0;
        }
    }
}
