//! Category budget targets
//!
//! Every category has an optional target amount. Targets are recorded and
//! shown but are not compared against spending anywhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::Category;
use super::money::Money;

/// Mapping from category to its optional target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budgets {
    targets: BTreeMap<Category, Option<Money>>,
}

impl Budgets {
    /// One unset entry per category
    pub fn new() -> Self {
        Self {
            targets: Category::ALL.into_iter().map(|c| (c, None)).collect(),
        }
    }

    pub fn target(&self, category: Category) -> Option<Money> {
        self.targets.get(&category).copied().flatten()
    }

    /// Set or clear a category target
    pub fn set_target(&mut self, category: Category, target: Option<Money>) {
        self.targets.insert(category, target.map(|t| t.abs()));
    }

    /// Iterate all categories with their targets, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<Money>)> + '_ {
        self.targets.iter().map(|(c, t)| (*c, *t))
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Budgets {
    fn default() -> Self {
        Self::new()
    }
}
