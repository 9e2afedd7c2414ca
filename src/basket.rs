/* ===============================================================================
Smart basket advisor.
Text views of the basket, panels and checkout. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use chrono::Local;

use crate::advice::Tip;
use crate::cart::{CartLine, CartStore};
use crate::checkout::Checkout;
use crate::environment as env;
use crate::product::Product;
use crate::recommend::Recommendation;

// Short stats line
pub fn header(cart: &CartStore) -> String {
   format!("🛒 Items: {} | Total: {} | Calories: {}",
      cart.len(),
      env::price_with_unit(cart.total_price()),
      cart.total_calories()
   )
}

fn line_text(line: &CartLine) -> String {
   // "{image} {name}: {price} x {amount} pcs. = {cost} [id]"
   format!("{} {}: {} x {} pcs. = {}  [{}]",
      line.product.image,
      line.product.name,
      env::price_with_unit(line.product.price),
      line.quantity,
      env::price_with_unit(line.cost()),
      line.id()
   )
}

pub fn cart_text(cart: &CartStore) -> String {
   if cart.is_empty() {
      return String::from("Your cart is empty\nSearch for products to get started!");
   }

   let items = cart.lines().iter()
   .fold(String::default(), |acc, line| format!("{}{}\n", acc, line_text(line)));

   format!("{}\nIn cart {} pos., {} pcs.\nSubtotal: {}\nTotal calories: {}",
      items,
      cart.len(),
      cart.items_count(),
      env::price_with_unit(cart.total_price()),
      cart.total_calories()
   )
}

// Numbered list for selecting with "add N"
pub fn products_text(products: &[Product]) -> String {
   if products.is_empty() {
      return String::from("Nothing found");
   }

   products.iter()
   .enumerate()
   .map(|(i, p)| format!("{}. {} {} ({}) {}  [{}]", i + 1, p.image, p.name, p.category, env::price_with_unit(p.price), p.id))
   .collect::<Vec<_>>()
   .join("\n")
}

pub fn tips_text(tips: &[Tip]) -> String {
   tips.iter()
   .fold(String::from("💡 Smart Shopping Tips"), |acc, tip| format!("{}\n • {}", acc, tip))
}

pub fn panels_text(panels: &Recommendation, loading: bool) -> String {
   let mut res = String::from("💡 Smart Recommendations");
   if loading {
      res.push_str("\nAnalyzing your basket...");
   }

   if !panels.recommendations.is_empty() {
      res.push('\n');
      res.push_str(&products_text(&panels.recommendations));
   }

   let n = &panels.nutrition_info;
   if n.calories > 0 {
      res.push_str(&format!("\nNutrition: {} kcal, protein {:.1} g, carbs {:.1} g, fat {:.1} g, fiber {:.1} g, sugar {:.1} g",
         n.calories, n.protein, n.carbs, n.fat, n.fiber, n.sugar));
   }

   if !panels.bundle_discounts.is_empty() {
      res.push_str("\n🎁 Bundle Discounts Available!");
      for bundle in &panels.bundle_discounts {
         res.push_str(&format!("\n{}\nAdd {} for {}\nSave {}",
            bundle.bundle_name, bundle.missing_items.join(", "), bundle.discount, bundle.savings));
      }
   }

   if !panels.health_warnings.is_empty() {
      res.push_str("\n⚠ Health Warnings");
      for warning in &panels.health_warnings {
         res.push('\n');
         res.push_str(warning);
      }
   }

   res
}

pub fn checkout_text(checkout: &Checkout) -> String {
   let bill = checkout.bill.iter()
   .fold(String::from("📋 Bill Summary"), |acc, line| {
      format!("{}\n{} {}  Qty: {} × {} = {}",
         acc, line.image, line.name, line.quantity,
         env::price_with_unit(line.price),
         env::price_with_unit(line.total)
      )
   });

   let n = &checkout.nutrition;
   let nutrition = format!("🍎 Nutrition Summary\nCalories: {} kcal\nProtein: {:.1} g\nCarbs: {:.1} g\nFat: {:.1} g\nFiber: {:.1} g\nSugar: {:.1} g",
      n.calories, n.protein, n.carbs, n.fat, n.fiber, n.sugar);

   let insights = checkout.insights.iter()
   .fold(String::from("💡 Health Insights"), |acc, insight| format!("{}\n{}", acc, insight));

   format!("{}\n\nSubtotal: {}\nTax (8%): {}\nTotal: {}\n\n{}\n\n{}\n\n{}\nType 'pay' to pay {} or 'clear' to empty the cart",
      bill,
      env::price_with_unit(checkout.subtotal),
      env::price_with_unit(checkout.tax),
      env::price_with_unit(checkout.total),
      nutrition,
      insights,
      Local::now().format("%d %b %Y %H:%M"),
      env::price_with_unit(checkout.total)
   )
}

pub fn help_text() -> String {
   String::from("Commands:
list - show the catalog
search <text> or any text - find products
add <N|id> - add product by number from the last list or by id
del <id> - remove product
qty <id> <N> - set quantity, 0 removes
+<id> / -<id> - one more / one less
cart - show the cart
tips - shopping tips
recs - recommendations, bundles and warnings
ask <text> - ask the shopping assistant
checkout - bill and health insights
pay - pay for the order
clear - empty the cart
help - this text
exit - quit")
}
