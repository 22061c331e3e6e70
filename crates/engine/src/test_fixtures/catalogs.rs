//! In-memory game data catalogs for testing.

use std::collections::{HashMap, HashSet};

use raidledger_domain::{QuestId, TemplateId, TraderId};

use crate::infrastructure::ports::{
    DialogueKind, InsuranceTerms, ItemCatalog, LocationCatalog, LocationInfo, QuestCatalog,
    QuestConditionRef, TraderCatalog,
};

#[derive(Default)]
pub struct FakeItemCatalog {
    pub quest_items: HashSet<TemplateId>,
    pub money: HashSet<TemplateId>,
    pub prices: HashMap<TemplateId, f64>,
}

impl FakeItemCatalog {
    pub fn with_quest_item(mut self, tpl: &str) -> Self {
        self.quest_items.insert(TemplateId::new(tpl));
        self
    }

    pub fn with_money(mut self, tpl: &str) -> Self {
        self.money.insert(TemplateId::new(tpl));
        self
    }

    pub fn with_price(mut self, tpl: &str, price: f64) -> Self {
        self.prices.insert(TemplateId::new(tpl), price);
        self
    }
}

impl ItemCatalog for FakeItemCatalog {
    fn exists(&self, _tpl: &TemplateId) -> bool {
        true
    }

    fn is_quest_item(&self, tpl: &TemplateId) -> bool {
        self.quest_items.contains(tpl)
    }

    fn is_money(&self, tpl: &TemplateId) -> bool {
        self.money.contains(tpl)
    }

    fn handbook_price(&self, tpl: &TemplateId) -> Option<f64> {
        self.prices.get(tpl).copied()
    }
}

/// Every trader gets `terms` unless overridden; dialogue ids are
/// `"<kind>_0"` so tests can tell message groups apart.
pub struct FakeTraderCatalog {
    pub terms: HashMap<TraderId, InsuranceTerms>,
    pub default_terms: Option<InsuranceTerms>,
    pub coefficients: HashMap<TraderId, f64>,
}

impl Default for FakeTraderCatalog {
    fn default() -> Self {
        Self {
            terms: HashMap::new(),
            default_terms: Some(InsuranceTerms {
                min_return_hours: 2,
                max_return_hours: 4,
                max_storage_time_hours: 96,
            }),
            coefficients: HashMap::new(),
        }
    }
}

impl FakeTraderCatalog {
    pub fn with_coefficient(mut self, trader: TraderId, coefficient: f64) -> Self {
        self.coefficients.insert(trader, coefficient);
        self
    }
}

impl TraderCatalog for FakeTraderCatalog {
    fn insurance_terms(&self, trader_id: &TraderId) -> Option<InsuranceTerms> {
        self.terms.get(trader_id).copied().or(self.default_terms)
    }

    fn loyalty_insurance_coefficient(&self, trader_id: &TraderId, _loyalty_level: i32) -> f64 {
        self.coefficients.get(trader_id).copied().unwrap_or(0.0)
    }

    fn dialogue(&self, _trader_id: &TraderId, kind: DialogueKind) -> Vec<String> {
        vec![format!("{kind:?}_0")]
    }
}

#[derive(Default)]
pub struct FakeLocationCatalog {
    pub locations: HashMap<String, LocationInfo>,
}

impl FakeLocationCatalog {
    pub fn with_location(mut self, name: &str, insurance_enabled: bool, access_keys: &[&str]) -> Self {
        self.locations.insert(
            name.to_string(),
            LocationInfo {
                id: name.to_string(),
                name: name.to_string(),
                insurance_enabled,
                access_keys: access_keys.iter().map(|k| TemplateId::new(*k)).collect(),
            },
        );
        self
    }
}

impl LocationCatalog for FakeLocationCatalog {
    fn location(&self, name: &str) -> Option<LocationInfo> {
        self.locations.get(name).cloned()
    }
}

/// Maps an item template to the quest conditions it satisfies.
#[derive(Default)]
pub struct FakeQuestCatalog {
    pub conditions: HashMap<TemplateId, Vec<QuestConditionRef>>,
}

impl FakeQuestCatalog {
    pub fn with_condition(mut self, tpl: &str, quest: &str, condition: &str) -> Self {
        self.conditions
            .entry(TemplateId::new(tpl))
            .or_default()
            .push(QuestConditionRef {
                quest_id: QuestId::new(quest),
                condition_id: condition.to_string(),
            });
        self
    }
}

impl QuestCatalog for FakeQuestCatalog {
    fn find_item_conditions(
        &self,
        item_tpl: &TemplateId,
        active_quests: &[QuestId],
    ) -> Vec<QuestConditionRef> {
        self.conditions
            .get(item_tpl)
            .map(|conditions| {
                conditions
                    .iter()
                    .filter(|c| active_quests.contains(&c.quest_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
