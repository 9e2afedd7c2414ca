/* ===============================================================================
Smart basket advisor.
Cart with products and quantities. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use crate::product::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
   pub product: Product,
   pub quantity: u32, // never zero
}

impl CartLine {
   pub fn id(&self) -> &str {
      &self.product.id
   }

   pub fn cost(&self) -> f64 {
      self.product.price * self.quantity as f64
   }

   pub fn calories(&self) -> u64 {
      self.product.nutrition.calories as u64 * self.quantity as u64
   }
}

/// Canonical list of cart lines in insertion order, at most one line per product.
///
/// Every change of the content bumps the revision, so a result computed
/// from a snapshot can be checked against the current cart later.
#[derive(Debug, Default)]
pub struct CartStore {
   lines: Vec<CartLine>,
   revision: u64,
}

impl CartStore {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn lines(&self) -> &[CartLine] {
      &self.lines
   }

   pub fn len(&self) -> usize {
      self.lines.len()
   }

   pub fn is_empty(&self) -> bool {
      self.lines.is_empty()
   }

   pub fn revision(&self) -> u64 {
      self.revision
   }

   pub fn get(&self, product_id: &str) -> Option<&CartLine> {
      self.lines.iter().find(|line| line.id() == product_id)
   }

   // Total pieces of all products
   pub fn items_count(&self) -> u64 {
      self.lines.iter()
      .fold(0u64, |acc, line| acc.saturating_add(line.quantity as u64))
   }

   pub fn add(&mut self, product: Product) {
      match self.lines.iter_mut().find(|line| line.product.id == product.id) {
         Some(line) => line.quantity = line.quantity.saturating_add(1),
         None => self.lines.push(CartLine { product, quantity: 1 }),
      }
      self.revision += 1;
   }

   pub fn remove(&mut self, product_id: &str) {
      let len = self.lines.len();
      self.lines.retain(|line| line.id() != product_id);
      if self.lines.len() != len {
         self.revision += 1;
      }
   }

   pub fn set_quantity(&mut self, product_id: &str, new_quantity: i64) {
      if new_quantity <= 0 {
         self.remove(product_id);
         return;
      }

      let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
      if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product_id) {
         if line.quantity != quantity {
            line.quantity = quantity;
            self.revision += 1;
         }
      }
   }

   pub fn increment(&mut self, product_id: &str) {
      if let Some(quantity) = self.get(product_id).map(|line| line.quantity as i64) {
         self.set_quantity(product_id, quantity + 1);
      }
   }

   pub fn decrement(&mut self, product_id: &str) {
      if let Some(quantity) = self.get(product_id).map(|line| line.quantity as i64) {
         self.set_quantity(product_id, quantity - 1);
      }
   }

   pub fn clear(&mut self) {
      if !self.lines.is_empty() {
         self.lines.clear();
         self.revision += 1;
      }
   }

   pub fn total_price(&self) -> f64 {
      self.lines.iter()
      .fold(0.0, |acc, line| acc + line.cost())
   }

   pub fn total_calories(&self) -> u64 {
      self.lines.iter()
      .fold(0u64, |acc, line| acc.saturating_add(line.calories()))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn product(id: &str, price: f64, calories: u32) -> Product {
      let nutrition = NutritionProfile { calories, ..Default::default() };
      Product::sample(id, Category::Fruits, price, nutrition)
   }

   fn ids(cart: &CartStore) -> Vec<&str> {
      cart.lines().iter().map(|line| line.id()).collect()
   }

   #[test]
   fn same_product_merges() {
      let mut cart = CartStore::new();
      cart.add(product("apple", 1.0, 95));
      cart.add(product("apple", 1.0, 95));
      assert_eq!(cart.len(), 1);
      assert_eq!(cart.get("apple").unwrap().quantity, 2);
      assert_eq!(cart.items_count(), 2);
   }

   #[test]
   fn insertion_order_is_kept() {
      let mut cart = CartStore::new();
      cart.add(product("a", 1.0, 0));
      cart.add(product("b", 1.0, 0));
      cart.add(product("c", 1.0, 0));
      cart.set_quantity("a", 7);
      cart.add(product("b", 1.0, 0));
      assert_eq!(ids(&cart), ["a", "b", "c"]);
      assert_eq!(cart.get("a").unwrap().quantity, 7);
   }

   #[test]
   fn zero_quantity_same_as_remove() {
      let mut by_quantity = CartStore::new();
      let mut by_remove = CartStore::new();
      for cart in [&mut by_quantity, &mut by_remove] {
         cart.add(product("a", 2.0, 10));
         cart.add(product("b", 3.0, 20));
      }
      by_quantity.set_quantity("a", 0);
      by_remove.remove("a");
      assert_eq!(by_quantity.lines(), by_remove.lines());

      by_quantity.set_quantity("b", -4);
      assert!(by_quantity.is_empty());
   }

   #[test]
   fn decrement_below_one_removes() {
      let mut cart = CartStore::new();
      cart.add(product("a", 2.0, 10));
      cart.add(product("a", 2.0, 10));
      cart.decrement("a");
      assert_eq!(cart.get("a").unwrap().quantity, 1);
      cart.decrement("a");
      assert!(cart.get("a").is_none());
      cart.increment("a");
      assert!(cart.is_empty());
   }

   #[test]
   fn unknown_id_is_noop() {
      let mut cart = CartStore::new();
      cart.add(product("a", 2.0, 10));
      let revision = cart.revision();
      cart.remove("zzz");
      cart.set_quantity("zzz", 3);
      cart.set_quantity("a", 1);
      assert_eq!(cart.revision(), revision);
      assert_eq!(cart.len(), 1);
   }

   #[test]
   fn clear_is_idempotent() {
      let mut cart = CartStore::new();
      cart.add(product("a", 2.0, 10));
      cart.clear();
      let revision = cart.revision();
      cart.clear();
      assert!(cart.is_empty());
      assert_eq!(cart.revision(), revision);
   }

   #[test]
   fn totals() {
      let mut cart = CartStore::new();
      assert_eq!(cart.total_price(), 0.0);
      assert_eq!(cart.total_calories(), 0);

      cart.add(product("a", 2.5, 100));
      cart.add(product("b", 1.25, 40));
      cart.set_quantity("a", 4);
      assert_eq!(cart.total_price(), 11.25);
      assert_eq!(cart.total_calories(), 440);
   }

   #[test]
   fn huge_quantity_saturates() {
      let mut cart = CartStore::new();
      cart.add(product("a", 1.0, 1));
      cart.set_quantity("a", i64::MAX);
      assert_eq!(cart.get("a").unwrap().quantity, u32::MAX);
   }

   #[test]
   fn huge_totals_saturate() {
      let json = r#"{"id": "x", "nutrition": {"calories": 4000000000}}"#;
      let mut cart = CartStore::new();
      for id in ["a", "b", "c", "d", "e"] {
         let mut product: Product = serde_json::from_str(json).unwrap();
         product.id = id.to_string();
         cart.add(product);
         cart.set_quantity(id, i64::MAX);
      }
      assert_eq!(cart.total_calories(), u64::MAX);
      assert_eq!(cart.items_count(), 5 * u32::MAX as u64);
      assert_eq!(crate::nutrition::aggregate(cart.lines()).calories, u64::MAX);
      assert!(crate::advice::tips(cart.lines()).contains(&crate::advice::Tip::Calories));
   }
}
