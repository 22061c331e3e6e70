//! Fence karma and player scav regeneration.

use std::sync::Arc;

use raidledger_domain::common::unix_seconds;
use raidledger_domain::{
    BotTemplate, Character, CharacterId, EquipmentSlot, ExitStatus, FenceStanding, Item, ItemId,
    KarmaTier, Profile, RaidSettings, SessionId, Skills, Stats, Victim, BASE_SCAV_ROLE,
    SCAV_COOLDOWN_TIMER_BONUS,
};

use crate::infrastructure::ports::{BotGenerationPort, ClockPort, RandomPort};

use super::error::RaidError;

/// Difficulty every player scav is generated at.
const PLAYER_SCAV_DIFFICULTY: &str = "easy";

pub struct ScavKarmaEngine {
    bots: Arc<dyn BotGenerationPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    settings: Arc<RaidSettings>,
}

impl ScavKarmaEngine {
    pub fn new(
        bots: Arc<dyn BotGenerationPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        settings: Arc<RaidSettings>,
    ) -> Self {
        Self {
            bots,
            random,
            clock,
            settings,
        }
    }

    /// Karma level of the shared fence standing; 0 before any standing exists.
    pub fn karma_level(&self, pmc: &Character) -> i32 {
        pmc.fence_info()
            .map(|fence| FenceStanding::new(fence.standing).karma_level())
            .unwrap_or(0)
    }

    /// Applies standing changes from a scav raid's kills and extraction to
    /// the fence reputation both characters share.
    pub fn apply_kill_karma(
        &self,
        profile: &mut Profile,
        victims: &[Victim],
        exit: ExitStatus,
    ) -> FenceStanding {
        let scav_settings = &self.settings.player_scav;
        let start = profile.pmc().fence_info().map_or(0.0, |fence| fence.standing);

        let mut deltas = Vec::with_capacity(victims.len() + 1);
        if exit.is_survived() {
            let level = FenceStanding::new(start).karma_level();
            let bonus = scav_settings
                .karma_levels
                .get(&level)
                .and_then(|tier| tier.extraction_standing_bonus)
                .unwrap_or(self.settings.in_raid.scav_extract_gain);
            deltas.push(bonus);
        }

        for victim in victims {
            let key = if victim.is_scav() {
                victim.role.to_lowercase()
            } else {
                victim.side.to_lowercase()
            };
            match scav_settings.standing_for_kill.get(&key) {
                Some(delta) => deltas.push(*delta),
                None => tracing::warn!(
                    victim = %victim.name,
                    key = %key,
                    "No fence standing configured for kill, skipping"
                ),
            }
        }

        let standing = FenceStanding::accumulate(start, deltas);
        let characters = std::iter::once(&mut profile.characters.pmc)
            .chain(profile.characters.scav.as_mut());
        for character in characters {
            let fence = character.fence_info_mut();
            fence.standing = standing.value();
            fence.loyalty_level = fence.loyalty_level.max(1);
        }

        tracing::info!(
            session_id = %profile.session_id(),
            start,
            standing = standing.value(),
            kills = victims.len(),
            "Applied scav karma"
        );
        standing
    }

    /// Replaces the profile's scav with a freshly generated one matching the
    /// current karma tier.
    pub fn regenerate(&self, session_id: &SessionId, profile: &mut Profile) -> Result<(), RaidError> {
        let level = if profile.characters.scav.is_some() {
            self.karma_level(profile.pmc())
        } else {
            0
        };
        let tier = match self.settings.player_scav.karma_levels.get(&level) {
            Some(tier) => tier.clone(),
            None => {
                tracing::error!(
                    session_id = %session_id,
                    karma_level = level,
                    "No karma tier configured, generating with defaults"
                );
                KarmaTier::default()
            }
        };

        let template = self.build_template(&tier)?;
        let role = tier.bot_type_for_loot.to_lowercase();
        let mut scav =
            self.bots
                .generate_player_scav(session_id, &role, PLAYER_SCAV_DIFFICULTY, &template);
        self.bots.clear_loot_cache();

        let scav_id = match profile.pmc().savage.clone() {
            Some(id) => id,
            None => {
                let id = CharacterId::from_uuid(self.random.gen_uuid());
                tracing::warn!(session_id = %session_id, scav_id = %id, "PMC had no scav id, assigned one");
                profile.pmc_mut().savage = Some(id.clone());
                id
            }
        };

        let pmc = profile.pmc();
        scav.id = scav_id;
        scav.aid = pmc.aid.clone();
        scav.traders_info = pmc.traders_info.clone();
        match profile.characters.scav.as_ref() {
            Some(previous) => {
                scav.skills = previous.skills.clone();
                scav.stats = previous.stats.clone();
                scav.info.level = previous.info.level.max(1);
                scav.info.experience = previous.info.experience;
                scav.quests = previous.quests.clone();
                scav.task_condition_counters = previous.task_condition_counters.clone();
            }
            None => {
                scav.skills = Skills::default();
                scav.stats = Stats::default();
                scav.info.level = 1;
                scav.info.experience = 0;
            }
        }

        self.maybe_add_access_item(&mut scav, &tier);
        strip_secure_container(&mut scav);
        scav.info.savage_lock_time =
            unix_seconds(self.clock.now()) as f64 + self.cooldown_seconds(profile);

        tracing::info!(
            session_id = %session_id,
            karma_level = level,
            role = %role,
            lock_time = scav.info.savage_lock_time,
            "Regenerated player scav"
        );
        profile.characters.scav = Some(scav);
        Ok(())
    }

    /// Seconds a freshly generated scav stays locked.
    pub fn cooldown_seconds(&self, profile: &Profile) -> f64 {
        let settings = &self.settings.player_scav;
        if profile.is_developer_account() {
            return settings.developer_cooldown_seconds;
        }
        let pmc = profile.pmc();
        let bonus_modifier = 1.0 + pmc.bonus_total(SCAV_COOLDOWN_TIMER_BONUS) / 100.0;
        let fence_modifier = settings.fence_cooldown_modifier(self.karma_level(pmc));
        settings.base_cooldown_seconds * bonus_modifier * fence_modifier
    }

    fn build_template(&self, tier: &KarmaTier) -> Result<BotTemplate, RaidError> {
        let mut template = self
            .bots
            .template(BASE_SCAV_ROLE)
            .ok_or_else(|| RaidError::BotTemplateMissing(BASE_SCAV_ROLE.to_string()))?;

        let loot_role = tier.bot_type_for_loot.to_lowercase();
        if loot_role != BASE_SCAV_ROLE {
            let source = self
                .bots
                .template(&loot_role)
                .ok_or(RaidError::BotTemplateMissing(loot_role))?;
            template.take_loot_from(source);
        }

        for (slot, delta) in &tier.modifiers.equipment {
            if *delta == 0.0 {
                continue;
            }
            *template
                .chances
                .equipment
                .entry(slot.as_slot_id().to_string())
                .or_insert(0.0) += delta;
        }
        for (slot, delta) in &tier.modifiers.mods {
            if *delta == 0.0 {
                continue;
            }
            *template.chances.mods.entry(slot.clone()).or_insert(0.0) += delta;
        }
        for (category, limit) in &tier.item_limits {
            template.generation.items.insert(category.clone(), *limit);
        }
        for (slot, blacklisted) in &tier.equipment_blacklist {
            if let Some(pool) = template.inventory.equipment.get_mut(slot.as_slot_id()) {
                for tpl in blacklisted {
                    pool.remove(tpl);
                }
            }
        }
        Ok(template)
    }

    fn maybe_add_access_item(&self, scav: &mut Character, tier: &KarmaTier) {
        let chance = tier.access_item_chance_percent;
        if chance <= 0.0 || f64::from(self.random.gen_range(1, 100)) > chance {
            return;
        }
        let tpl = self.settings.player_scav.access_item_tpl.clone();
        let item = Item::new(ItemId::from_uuid(self.random.gen_uuid()), tpl.clone());
        if !self.bots.add_item_to_containers(
            &mut scav.inventory,
            item,
            &EquipmentSlot::loot_containers(),
        ) {
            tracing::warn!(item_tpl = %tpl, "No room for scav access item");
        }
    }
}

fn strip_secure_container(scav: &mut Character) {
    let secure = scav
        .inventory
        .equipped_in(EquipmentSlot::SecuredContainer.as_slot_id())
        .map(|item| item.id.clone());
    if let Some(secure) = secure {
        scav.inventory.remove_with_children(&secure);
    }
}
