/* ===============================================================================
Smart basket advisor.
Shopping tips from cart contents. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use parse_display::Display;

use crate::cart::CartLine;
use crate::nutrition;
use crate::product::Category;

// More lines than this is a full basket
pub const FULL_BASKET_LINES: usize = 5;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
   #[display("Start by searching for your favorite groceries!")]
   Search,
   #[display("Add fresh fruits and vegetables for a healthy basket.")]
   FreshProduce,
   #[display("Look for bundle discounts as you add more items.")]
   LookForBundles,
   #[display("Add some fruits for vitamins and fiber.")]
   Fruits,
   #[display("Vegetables add color and nutrition to your meals.")]
   Vegetables,
   #[display("Balance snacks with healthy options like nuts or yogurt.")]
   BalanceSnacks,
   #[display("You have a full basket! Check for bundle discounts.")]
   FullBasket,
   #[display("Watch out for high sugar content.")]
   Sugar,
   #[display("High calorie intake detected. Consider lighter options.")]
   Calories,
   #[display("Great basket! You're making smart choices.")]
   Great,
}

// For an empty cart
pub const ONBOARDING: [Tip; 3] = [Tip::Search, Tip::FreshProduce, Tip::LookForBundles];

pub fn tips(lines: &[CartLine]) -> Vec<Tip> {
   if lines.is_empty() {
      return ONBOARDING.to_vec();
   }

   let has = |category| lines.iter().any(|line| line.product.is(category));
   let total = nutrition::aggregate(lines);

   let mut res = Vec::new();
   if !has(Category::Fruits) {
      res.push(Tip::Fruits);
   }
   if !has(Category::Vegetables) {
      res.push(Tip::Vegetables);
   }
   if has(Category::Snacks) {
      res.push(Tip::BalanceSnacks);
   }
   if lines.len() > FULL_BASKET_LINES {
      res.push(Tip::FullBasket);
   }
   if total.is_high_sugar() {
      res.push(Tip::Sugar);
   }
   if total.is_high_calorie() {
      res.push(Tip::Calories);
   }

   if res.is_empty() {
      res.push(Tip::Great);
   }
   res
}
