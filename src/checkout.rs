/* ===============================================================================
Smart basket advisor.
Bill and health insights for the cart. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use parse_display::Display;

use crate::cart::CartLine;
use crate::environment as env;
use crate::nutrition::{self, AggregatedNutrition};

// Flat rate, no regional rules
pub const TAX_RATE: f64 = 0.08;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
   #[display("⚠️ High calorie intake detected")]
   HighCalories,
   #[display("⚠️ High sugar content")]
   HighSugar,
   #[display("💡 Consider adding more fiber-rich foods")]
   LowFiber,
   #[display("✅ Good protein intake!")]
   GoodProtein,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
   pub name: String,
   pub image: String,
   pub quantity: u32,
   pub price: f64,
   pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
   pub bill: Vec<BillLine>,
   pub subtotal: f64,
   pub tax: f64,
   pub total: f64,
   pub nutrition: AggregatedNutrition,
   pub insights: Vec<Insight>,
}

// Each check stands on its own
pub fn insights(n: &AggregatedNutrition) -> Vec<Insight> {
   let mut res = Vec::new();
   if n.is_high_calorie() {
      res.push(Insight::HighCalories);
   }
   if n.is_high_sugar() {
      res.push(Insight::HighSugar);
   }
   if n.fiber < nutrition::FIBER_TARGET {
      res.push(Insight::LowFiber);
   }
   if n.protein > nutrition::PROTEIN_GOOD {
      res.push(Insight::GoodProtein);
   }
   res
}

pub fn checkout(lines: &[CartLine]) -> Checkout {
   let bill: Vec<BillLine> = lines.iter()
   .map(|line| BillLine {
      name: line.product.name.clone(),
      image: line.product.image.clone(),
      quantity: line.quantity,
      price: line.product.price,
      total: line.cost(),
   })
   .collect();

   let subtotal = bill.iter().fold(0.0, |acc, line| acc + line.total);
   let tax = subtotal * TAX_RATE;
   let nutrition = nutrition::aggregate(lines);

   Checkout {
      bill,
      subtotal,
      tax,
      total: subtotal + tax,
      insights: insights(&nutrition),
      nutrition,
   }
}

// Payment is out of scope, just note the intent
pub fn pay(checkout: &Checkout) {
   log::info!("checkout::pay {} for {} lines", env::price_with_unit(checkout.total), checkout.bill.len());
}
