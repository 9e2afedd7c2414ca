/* ===============================================================================
Smart basket advisor.
Nutrition of the whole cart. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::ops::Add;
use serde::Deserialize;

use crate::cart::CartLine;
use crate::product;

// Thresholds for tips and checkout insights
pub const CALORIE_LIMIT: u64 = 2000;
pub const SUGAR_LIMIT: f64 = 50.0;
pub const FIBER_TARGET: f64 = 25.0;
pub const PROTEIN_GOOD: f64 = 100.0;

/// Quantity-weighted sum of nutrition over cart lines, not rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct AggregatedNutrition {
   #[serde(default, deserialize_with = "calories")]
   pub calories: u64,
   #[serde(default, deserialize_with = "product::amount")]
   pub protein: f64,
   #[serde(default, deserialize_with = "product::amount")]
   pub carbs: f64,
   #[serde(default, deserialize_with = "product::amount")]
   pub fat: f64,
   #[serde(default, deserialize_with = "product::amount")]
   pub fiber: f64,
   #[serde(default, deserialize_with = "product::amount")]
   pub sugar: f64,
}

fn calories<'de, D>(deserializer: D) -> Result<u64, D::Error>
where D: serde::Deserializer<'de>
{
   product::amount(deserializer).map(|n| n as u64)
}

impl AggregatedNutrition {
   // Contribution of a single line
   pub fn of(line: &CartLine) -> Self {
      let n = &line.product.nutrition;
      let quantity = line.quantity as f64;
      Self {
         calories: line.calories(),
         protein: n.protein * quantity,
         carbs: n.carbs * quantity,
         fat: n.fat * quantity,
         fiber: n.fiber * quantity,
         sugar: n.sugar * quantity,
      }
   }

   pub fn is_high_calorie(&self) -> bool {
      self.calories > CALORIE_LIMIT
   }

   pub fn is_high_sugar(&self) -> bool {
      self.sugar > SUGAR_LIMIT
   }
}

impl Add for AggregatedNutrition {
   type Output = AggregatedNutrition;

   fn add(self, other: Self) -> Self {
      Self {
         calories: self.calories.saturating_add(other.calories),
         protein: self.protein + other.protein,
         carbs: self.carbs + other.carbs,
         fat: self.fat + other.fat,
         fiber: self.fiber + other.fiber,
         sugar: self.sugar + other.sugar,
      }
   }
}

pub fn aggregate(lines: &[CartLine]) -> AggregatedNutrition {
   lines.iter()
   .fold(AggregatedNutrition::default(), |acc, line| acc + AggregatedNutrition::of(line))
}
