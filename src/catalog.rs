/* ===============================================================================
Smart basket advisor.
Product catalog and search. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::backend::Backend;
use crate::product::{self, Product};

pub trait CatalogClient: Send + Sync {
   // Full list for the initial load
   fn list(&self) -> BoxFuture<'_, Result<Vec<Product>, String>>;

   // Free text search on the backend side
   fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Product>, String>>;

   // Blank query gives nothing without asking the backend
   fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Product>, String>> {
      let query = query.trim();
      if query.is_empty() {
         return Box::pin(async { Ok(Vec::new()) });
      }
      self.lookup(query)
   }
}

#[derive(Deserialize)]
struct ProductsReply {
   #[serde(default, deserialize_with = "product::records")]
   products: Vec<Product>,
}

impl CatalogClient for Backend {
   fn list(&self) -> BoxFuture<'_, Result<Vec<Product>, String>> {
      Box::pin(async move {
         let reply: ProductsReply = self.get("/products", &[])
         .await
         .map_err(|err| format!("catalog list: {}", err))?;
         Ok(reply.products)
      })
   }

   fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Product>, String>> {
      Box::pin(async move {
         let reply: ProductsReply = self.get("/search", &[("query", query)])
         .await
         .map_err(|err| format!("catalog search '{}': {}", query, err))?;
         Ok(reply.products)
      })
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use std::sync::atomic::{AtomicUsize, Ordering};

   struct Counting {
      calls: AtomicUsize,
   }

   impl CatalogClient for Counting {
      fn list(&self) -> BoxFuture<'_, Result<Vec<Product>, String>> {
         Box::pin(async { Ok(Vec::new()) })
      }

      fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Product>, String>> {
         self.calls.fetch_add(1, Ordering::SeqCst);
         Box::pin(async move { Ok(vec![Product::sample(query, product::Category::Fruits, 1.0, Default::default())]) })
      }
   }

   #[tokio::test]
   async fn blank_query_skips_backend() {
      let catalog = Counting { calls: AtomicUsize::new(0) };
      assert!(catalog.search("").await.unwrap().is_empty());
      assert!(catalog.search("   ").await.unwrap().is_empty());
      assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);

      let found = catalog.search(" apple ").await.unwrap();
      assert_eq!(found[0].id, "apple");
      assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
   }

   #[test]
   fn reply_without_products() {
      let reply: ProductsReply = serde_json::from_str("{}").unwrap();
      assert!(reply.products.is_empty());
   }
}
