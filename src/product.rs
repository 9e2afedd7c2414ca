/* ===============================================================================
Smart basket advisor.
Products from catalog. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::AsRefStr;

// Well-known category tags, the backend may send any other string
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
   Fruits,
   Vegetables,
   Dairy,
   Meat,
   Grains,
   Seafood,
   Snacks,
   Beverages,
   Frozen,
   Canned,
   Condiments,
}

/// Nutrition of one unit of product. Anything absent upstream counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
   #[serde(default, deserialize_with = "calories")]
   pub calories: u32,
   #[serde(default, deserialize_with = "amount")]
   pub protein: f64, // grams
   #[serde(default, deserialize_with = "amount")]
   pub carbs: f64,
   #[serde(default, deserialize_with = "amount")]
   pub fat: f64,
   #[serde(default, deserialize_with = "amount")]
   pub fiber: f64,
   #[serde(default, deserialize_with = "amount")]
   pub sugar: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
   pub id: String,
   #[serde(default, deserialize_with = "text")]
   pub name: String,
   #[serde(default, deserialize_with = "text")]
   pub category: String,
   #[serde(default, deserialize_with = "amount")]
   pub price: f64,
   #[serde(default, deserialize_with = "or_default")]
   pub nutrition: NutritionProfile,
   #[serde(default, deserialize_with = "text")]
   pub image: String, // glyph for display
   #[serde(default, deserialize_with = "text")]
   pub description: String,
}

impl Product {
   pub fn is(&self, category: Category) -> bool {
      self.category == category.as_ref()
   }
}

// ============================================================================
// [Lenient decoding]
// ============================================================================

// Non-negative number or zero for null, strings and the like
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where D: Deserializer<'de>
{
   let value = Value::deserialize(deserializer)?;
   let res = value.as_f64()
   .filter(|n| n.is_finite() && *n > 0.0)
   .unwrap_or_default();
   Ok(res)
}

// Whole calories, fractions are dropped
pub fn calories<'de, D>(deserializer: D) -> Result<u32, D::Error>
where D: Deserializer<'de>
{
   amount(deserializer).map(|n| n as u32)
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de>
{
   let value = Value::deserialize(deserializer)?;
   let res = match value {
      Value::String(s) => s,
      Value::Null => String::default(),
      other => other.to_string(),
   };
   Ok(res)
}

// Whole object falls back to its default if it has unexpected shape
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where D: Deserializer<'de>,
   T: DeserializeOwned + Default,
{
   let value = Value::deserialize(deserializer)?;
   Ok(serde_json::from_value(value).unwrap_or_default())
}

// Keeps the records that can be read, skipping broken ones
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where D: Deserializer<'de>,
   T: DeserializeOwned,
{
   let value = Value::deserialize(deserializer)?;
   let items = match value {
      Value::Array(items) => items,
      _ => return Ok(Vec::new()),
   };

   let res = items.into_iter()
   .filter_map(|item| {
      serde_json::from_value::<T>(item)
      .map_err(|err| log::warn!("product::records skip record: {}", err))
      .ok()
   })
   .collect();
   Ok(res)
}

#[cfg(test)]
impl Product {
   pub fn sample(id: &str, category: Category, price: f64, nutrition: NutritionProfile) -> Self {
      Self {
         id: id.to_string(),
         name: format!("Sample {}", id),
         category: category.as_ref().to_string(),
         price,
         nutrition,
         image: String::from("🛒"),
         description: String::default(),
      }
   }
}
