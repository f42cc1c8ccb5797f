//! Budget tracker document, derived figures and category edits.
//!
//! The budget screen keeps its data in on-device storage rather than the
//! hosted store. The stored JSON document shape is
//! `{ "totalBudget": number, "categories": [{ id, name, budget, spent, color }] }`
//! and must stay stable so previously saved documents keep loading.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, Timestamp};
use crate::validation::{require_non_negative, require_text};

/// On-device storage key holding the budget document.
pub const BUDGET_STORAGE_KEY: &str = "wedding-budget-data";

/// Total budget used when nothing has been saved yet.
pub const DEFAULT_TOTAL_BUDGET: f64 = 60_000.0;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    /// CSS hex color, `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    pub total_budget: f64,
    pub categories: Vec<Category>,
}

impl Default for BudgetData {
    fn default() -> Self {
        let seed = [
            (1, "Venue", 15_000.0, 12_000.0, "#3b82f6"),
            (2, "Catering", 20_000.0, 18_500.0, "#10b981"),
            (3, "Photography", 5_000.0, 5_000.0, "#8b5cf6"),
            (4, "Flowers", 3_000.0, 2_800.0, "#ec4899"),
            (5, "Music", 4_000.0, 3_500.0, "#f59e0b"),
            (6, "Attire", 8_000.0, 4_000.0, "#ef4444"),
            (7, "Invitations", 2_000.0, 1_500.0, "#06b6d4"),
            (8, "Decorations", 3_000.0, 0.0, "#84cc16"),
        ];
        Self {
            total_budget: DEFAULT_TOTAL_BUDGET,
            categories: seed
                .into_iter()
                .map(|(id, name, budget, spent, color)| Category {
                    id,
                    name: name.to_string(),
                    budget,
                    spent,
                    color: color.to_string(),
                })
                .collect(),
        }
    }
}

/// Downloadable export of the budget document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetExport {
    pub total_budget: f64,
    pub categories: Vec<Category>,
    pub exported_at: Timestamp,
}

/// Input for a new category. Spent defaults to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryDraft {
    #[serde(default)]
    pub name: String,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
}

// ---------------------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------------------

/// Per-category usage line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUsage {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub budget: f64,
    pub spent: f64,
    /// Percentage of the category budget spent, one decimal.
    pub percent_used: f64,
    /// Negative when over budget.
    pub remaining: f64,
    pub over_budget: bool,
}

/// Figures shown on the budget screen, recomputed from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    /// One decimal, e.g. `78.8`.
    pub percent_used: f64,
    pub percent_available: f64,
    /// Width of the overall progress bar, capped at 100.
    pub progress: f64,
    pub categories: Vec<CategoryUsage>,
}

/// `100 * part / whole`, or zero when `whole` is zero.
fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl BudgetData {
    pub fn total_spent(&self) -> f64 {
        self.categories.iter().map(|c| c.spent).sum()
    }

    /// `totalBudget - Σ spent`.
    pub fn remaining(&self) -> f64 {
        self.total_budget - self.total_spent()
    }

    /// `100 × Σ spent / totalBudget`, unrounded.
    pub fn percent_used(&self) -> f64 {
        percent(self.total_spent(), self.total_budget)
    }

    pub fn summary(&self) -> BudgetSummary {
        let percent_used = self.percent_used();
        BudgetSummary {
            total_budget: self.total_budget,
            total_spent: self.total_spent(),
            remaining: self.remaining(),
            percent_used: round1(percent_used),
            percent_available: round1(100.0 - percent_used),
            progress: round1(percent_used.min(100.0)),
            categories: self
                .categories
                .iter()
                .map(|c| {
                    let remaining = c.budget - c.spent;
                    CategoryUsage {
                        id: c.id,
                        name: c.name.clone(),
                        color: c.color.clone(),
                        budget: c.budget,
                        spent: c.spent,
                        percent_used: round1(percent(c.spent, c.budget)),
                        remaining,
                        over_budget: remaining < 0.0,
                    }
                })
                .collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Replace the total budget. Must be greater than zero.
    pub fn set_total_budget(&mut self, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::validation(
                "Please enter a valid budget amount greater than 0",
            ));
        }
        self.total_budget = amount;
        Ok(())
    }

    /// Append a category built from `draft`.
    ///
    /// `now_millis` seeds the id; it is bumped past any existing id so ids
    /// stay unique even when two categories are added within a millisecond.
    pub fn add_category(
        &mut self,
        draft: &CategoryDraft,
        now_millis: i64,
        color: String,
    ) -> Result<&Category, CoreError> {
        let name = require_text("Category name", &draft.name)
            .map_err(|_| CoreError::validation("Please enter a category name and budget"))?;
        let budget = draft
            .budget
            .ok_or_else(|| CoreError::validation("Please enter a category name and budget"))?;
        let budget = require_non_negative("Budget", budget)?;
        let spent = require_non_negative("Spent", draft.spent.unwrap_or(0.0))?;

        let id = next_category_id(&self.categories, now_millis);
        self.categories.push(Category {
            id,
            name,
            budget,
            spent,
            color,
        });
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Overwrite a category's budget and spent amounts.
    pub fn update_category(&mut self, id: i64, budget: f64, spent: f64) -> Result<(), CoreError> {
        let budget = require_non_negative("Budget", budget)?;
        let spent = require_non_negative("Spent", spent)?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| category_not_found(id))?;
        category.budget = budget;
        category.spent = spent;
        Ok(())
    }

    /// Remove exactly the category with `id`, leaving the rest untouched.
    pub fn remove_category(&mut self, id: i64) -> Result<Category, CoreError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| category_not_found(id))?;
        Ok(self.categories.remove(index))
    }

    pub fn export(&self, exported_at: Timestamp) -> BudgetExport {
        BudgetExport {
            total_budget: self.total_budget,
            categories: self.categories.clone(),
            exported_at,
        }
    }
}

fn category_not_found(id: i64) -> CoreError {
    CoreError::NotFound {
        entity: "Budget category",
        id: id.to_string(),
    }
}

/// Pick an id no existing category uses, preferring `now_millis`.
pub fn next_category_id(existing: &[Category], now_millis: i64) -> i64 {
    let max_existing = existing.iter().map(|c| c.id).max().unwrap_or(0);
    if existing.iter().any(|c| c.id == now_millis) || now_millis <= max_existing {
        max_existing + 1
    } else {
        now_millis
    }
}

/// A random `#rrggbb` color for a new category.
pub fn random_color() -> String {
    let value: u32 = rand::rng().random_range(0..=0xFF_FFFF);
    format!("#{value:06x}")
}

/// File name offered for a budget export taken on `date`.
pub fn export_filename(date: Date) -> String {
    format!("budget-tracker-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_matches_example_figures() {
        let data = BudgetData::default();
        assert_eq!(data.total_budget, 60_000.0);
        assert_eq!(data.total_spent(), 47_300.0);
        assert_eq!(data.remaining(), 12_700.0);

        let summary = data.summary();
        assert_eq!(summary.percent_used, 78.8);
        assert_eq!(summary.percent_available, 21.2);
    }

    #[test]
    fn document_json_uses_camel_case_total() {
        let json = serde_json::to_value(BudgetData::default()).unwrap();
        assert_eq!(json["totalBudget"], 60_000.0);
        assert_eq!(json["categories"][0]["name"], "Venue");
        assert_eq!(json["categories"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn zero_total_budget_reports_zero_percent() {
        let data = BudgetData {
            total_budget: 0.0,
            categories: vec![],
        };
        assert_eq!(data.percent_used(), 0.0);
    }

    #[test]
    fn total_budget_must_be_positive() {
        let mut data = BudgetData::default();
        assert!(data.set_total_budget(0.0).is_err());
        assert!(data.set_total_budget(-10.0).is_err());
        assert_eq!(data.total_budget, 60_000.0);

        data.set_total_budget(75_000.0).unwrap();
        assert_eq!(data.total_budget, 75_000.0);
    }

    #[test]
    fn add_category_requires_name_and_budget() {
        let mut data = BudgetData::default();
        let draft = CategoryDraft {
            name: "Cake".into(),
            budget: None,
            spent: None,
        };
        assert!(data.add_category(&draft, 1_700_000_000_000, "#ffffff".into()).is_err());
        assert_eq!(data.categories.len(), 8);
    }

    #[test]
    fn add_category_defaults_spent_to_zero() {
        let mut data = BudgetData::default();
        let draft = CategoryDraft {
            name: "Cake".into(),
            budget: Some(900.0),
            spent: None,
        };
        let added = data
            .add_category(&draft, 1_700_000_000_000, "#abcdef".into())
            .unwrap()
            .clone();
        assert_eq!(added.id, 1_700_000_000_000);
        assert_eq!(added.spent, 0.0);
        assert_eq!(data.categories.last(), Some(&added));
    }

    #[test]
    fn category_ids_stay_unique_within_one_millisecond() {
        let mut data = BudgetData::default();
        let draft = CategoryDraft {
            name: "Favors".into(),
            budget: Some(100.0),
            spent: Some(0.0),
        };
        let first = data.add_category(&draft, 5_000, "#000000".into()).unwrap().id;
        let second = data.add_category(&draft, 5_000, "#000000".into()).unwrap().id;
        assert_ne!(first, second);
    }

    #[test]
    fn delete_removes_exactly_one_category() {
        let mut data = BudgetData::default();
        let before = data.clone();

        let removed = data.remove_category(3).unwrap();
        assert_eq!(removed.name, "Photography");
        assert_eq!(data.categories.len(), before.categories.len() - 1);
        assert!(data.categories.iter().all(|c| c.id != 3));
        for category in &data.categories {
            let original = before.categories.iter().find(|c| c.id == category.id).unwrap();
            assert_eq!(category, original);
        }
    }

    #[test]
    fn delete_unknown_category_is_not_found() {
        let mut data = BudgetData::default();
        assert!(data.remove_category(999).is_err());
        assert_eq!(data, BudgetData::default());
    }

    #[test]
    fn update_category_marks_over_budget() {
        let mut data = BudgetData::default();
        data.update_category(1, 10_000.0, 12_500.0).unwrap();
        let venue = &data.summary().categories[0];
        assert!(venue.over_budget);
        assert_eq!(venue.remaining, -2_500.0);
        assert_eq!(venue.percent_used, 125.0);
    }

    #[test]
    fn progress_is_capped_at_one_hundred() {
        let mut data = BudgetData::default();
        data.set_total_budget(10_000.0).unwrap();
        assert_eq!(data.summary().progress, 100.0);
    }

    #[test]
    fn random_color_is_hex() {
        let color = random_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn export_filename_uses_date() {
        let date = Date::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(export_filename(date), "budget-tracker-2026-10-18.json");
    }

    #[test]
    fn export_carries_document_and_timestamp() {
        let at = chrono::Utc::now();
        let export = BudgetData::default().export(at);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["totalBudget"], 60_000.0);
        assert!(json["exportedAt"].is_string());
    }
}
