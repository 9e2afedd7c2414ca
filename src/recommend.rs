/* ===============================================================================
Smart basket advisor.
Recommendations and assistant for the current cart. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::cart::CartLine;
use crate::nutrition::AggregatedNutrition;
use crate::product::{self, Product};

// Promotion that needs some more items in the cart
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BundleDiscount {
   #[serde(default, deserialize_with = "product::text")]
   pub bundle_name: String,
   #[serde(default, deserialize_with = "product::or_default")]
   pub missing_items: Vec<String>,
   #[serde(default, deserialize_with = "product::text")]
   pub discount: String,
   #[serde(default, deserialize_with = "product::text")]
   pub savings: String,
}

/// Everything the service knows about the cart, shown in the side panels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
   #[serde(default, deserialize_with = "product::records")]
   pub recommendations: Vec<Product>,
   #[serde(default, deserialize_with = "product::or_default")]
   pub nutrition_info: AggregatedNutrition,
   #[serde(default, deserialize_with = "product::records")]
   pub bundle_discounts: Vec<BundleDiscount>,
   #[serde(default, deserialize_with = "product::records")]
   pub health_warnings: Vec<String>,
}

pub trait RecommendationClient: Send + Sync {
   fn recommend(&self, lines: Vec<CartLine>) -> BoxFuture<'_, Result<Recommendation, String>>;

   // Free-form question to the shopping assistant about the cart
   fn ask(&self, message: String, lines: Vec<CartLine>) -> BoxFuture<'_, Result<String, String>>;
}

// Product as the service expects it, with quantity inside
#[derive(Serialize)]
struct CartItem<'a> {
   #[serde(flatten)]
   product: &'a Product,
   quantity: u32,
}

fn cart_items(lines: &[CartLine]) -> Vec<CartItem<'_>> {
   lines.iter()
   .map(|line| CartItem { product: &line.product, quantity: line.quantity })
   .collect()
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
   cart_items: Vec<CartItem<'a>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
   message: &'a str,
   cart_items: Vec<CartItem<'a>>,
}

#[derive(Deserialize)]
struct ChatReply {
   #[serde(default, deserialize_with = "product::text")]
   response: String,
}

impl RecommendationClient for Backend {
   fn recommend(&self, lines: Vec<CartLine>) -> BoxFuture<'_, Result<Recommendation, String>> {
      Box::pin(async move {
         let body = RecommendRequest { cart_items: cart_items(&lines) };
         self.post::<_, Recommendation>("/recommend", &body)
         .await
         .map_err(|err| format!("recommend for {} lines: {}", lines.len(), err))
      })
   }

   fn ask(&self, message: String, lines: Vec<CartLine>) -> BoxFuture<'_, Result<String, String>> {
      Box::pin(async move {
         let body = ChatRequest { message: &message, cart_items: cart_items(&lines) };
         let reply: ChatReply = self.post("/chatbot", &body)
         .await
         .map_err(|err| format!("assistant: {}", err))?;
         Ok(reply.response)
      })
   }
}
