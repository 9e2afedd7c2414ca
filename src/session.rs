/* ===============================================================================
Smart basket advisor.
Shopping session: cart, catalog and panels from the service. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time};

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::checkout::{self, Checkout};
use crate::product::Product;
use crate::recommend::{Recommendation, RecommendationClient};

// Completed request to the recommendation service
#[derive(Debug)]
pub struct Refresh {
   pub revision: u64, // cart revision the request was made for
   pub result: Result<Recommendation, String>,
}

/// Single shopping session.
///
/// The cart changes synchronously. After each change of a non-empty cart a
/// refresh is spawned and its completion comes back through the channel
/// returned by `new`. Only the completion for the current cart revision is
/// applied, so a slow answer cannot overwrite fresher panels.
pub struct Session {
   cart: CartStore,
   panels: Recommendation,
   pending: Option<u64>, // revision of the awaited refresh
   catalog: Vec<Product>,
   results: Vec<Product>, // last search
   catalog_client: Arc<dyn CatalogClient>,
   recommender: Arc<dyn RecommendationClient>,
   timeout: Duration,
   tx: mpsc::UnboundedSender<Refresh>,
}

impl Session {
   pub fn new(catalog_client: Arc<dyn CatalogClient>, recommender: Arc<dyn RecommendationClient>, timeout: Duration) -> (Self, mpsc::UnboundedReceiver<Refresh>) {
      let (tx, rx) = mpsc::unbounded_channel();
      let session = Self {
         cart: CartStore::new(),
         panels: Recommendation::default(),
         pending: None,
         catalog: Vec::new(),
         results: Vec::new(),
         catalog_client,
         recommender,
         timeout,
         tx,
      };
      (session, rx)
   }

   pub fn cart(&self) -> &CartStore {
      &self.cart
   }

   pub fn panels(&self) -> &Recommendation {
      &self.panels
   }

   pub fn is_loading(&self) -> bool {
      self.pending.is_some()
   }

   // List for selecting by number: search results if any, otherwise catalog
   pub fn offer(&self) -> &[Product] {
      if self.results.is_empty() { &self.catalog } else { &self.results }
   }

   // Known product with the given id from anything displayed
   pub fn find(&self, product_id: &str) -> Option<Product> {
      self.results.iter()
      .chain(self.panels.recommendations.iter())
      .chain(self.catalog.iter())
      .find(|p| p.id == product_id)
      .or_else(|| self.cart.get(product_id).map(|line| &line.product))
      .cloned()
   }

   // ============================================================================
   // [Cart mutations]
   // ============================================================================

   pub fn add(&mut self, product: Product) {
      self.results.clear();
      self.mutate(|cart| cart.add(product));
   }

   pub fn remove(&mut self, product_id: &str) {
      self.mutate(|cart| cart.remove(product_id));
   }

   pub fn set_quantity(&mut self, product_id: &str, new_quantity: i64) {
      self.mutate(|cart| cart.set_quantity(product_id, new_quantity));
   }

   pub fn increment(&mut self, product_id: &str) {
      self.mutate(|cart| cart.increment(product_id));
   }

   pub fn decrement(&mut self, product_id: &str) {
      self.mutate(|cart| cart.decrement(product_id));
   }

   pub fn clear(&mut self) {
      self.mutate(|cart| cart.clear());
   }

   fn mutate<F: FnOnce(&mut CartStore)>(&mut self, f: F) {
      let revision = self.cart.revision();
      f(&mut self.cart);
      if self.cart.revision() == revision {
         return;
      }

      if self.cart.is_empty() {
         // Nothing to ask about, any request in flight is stale now
         self.panels = Recommendation::default();
         self.pending = None;
      } else {
         self.refresh();
      }
   }

   fn refresh(&mut self) {
      let revision = self.cart.revision();
      let lines = self.cart.lines().to_vec();
      let recommender = Arc::clone(&self.recommender);
      let timeout = self.timeout;
      let tx = self.tx.clone();

      self.pending = Some(revision);
      tokio::spawn(async move {
         let result = match time::timeout(timeout, recommender.recommend(lines)).await {
            Ok(res) => res,
            Err(_) => Err(format!("recommend: no answer within {:?}", timeout)),
         };

         if tx.send(Refresh { revision, result }).is_err() {
            log::debug!("session::refresh receiver closed for revision {}", revision);
         }
      });
   }

   // Returns true if the panels were updated
   pub fn apply(&mut self, refresh: Refresh) -> bool {
      if refresh.revision != self.cart.revision() {
         log::debug!("session::apply discard stale refresh {} for cart {}", refresh.revision, self.cart.revision());
         return false;
      }

      self.pending = None;
      match refresh.result {
         Ok(panels) => {
            self.panels = panels;
            true
         }
         Err(err) => {
            // Keep previous panels
            log::warn!("session::apply {}", err);
            false
         }
      }
   }

   // ============================================================================
   // [Catalog]
   // ============================================================================

   pub async fn load_catalog(&mut self) -> &[Product] {
      match time::timeout(self.timeout, self.catalog_client.list()).await {
         Ok(Ok(products)) => self.catalog = products,
         Ok(Err(err)) => log::warn!("session::load_catalog {}", err),
         Err(_) => log::warn!("session::load_catalog no answer within {:?}", self.timeout),
      }
      &self.catalog
   }

   pub async fn search(&mut self, query: &str) -> &[Product] {
      self.results = match time::timeout(self.timeout, self.catalog_client.search(query)).await {
         Ok(Ok(products)) => products,
         Ok(Err(err)) => {
            log::warn!("session::search {}", err);
            Vec::new()
         }
         Err(_) => {
            log::warn!("session::search '{}' no answer within {:?}", query, self.timeout);
            Vec::new()
         }
      };
      &self.results
   }

   // Answer of the assistant or None if it is unavailable
   pub async fn ask(&self, message: &str) -> Option<String> {
      let request = self.recommender.ask(message.to_string(), self.cart.lines().to_vec());
      match time::timeout(self.timeout, request).await {
         Ok(Ok(answer)) => Some(answer),
         Ok(Err(err)) => {
            log::warn!("session::ask {}", err);
            None
         }
         Err(_) => {
            log::warn!("session::ask no answer within {:?}", self.timeout);
            None
         }
      }
   }

   pub fn checkout(&self) -> Checkout {
      checkout::checkout(self.cart.lines())
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use futures::future::BoxFuture;
   use std::sync::atomic::{AtomicUsize, Ordering};

   use crate::cart::CartLine;
   use crate::product::*;

   // Answers with the number of lines it was asked about
   #[derive(Default)]
   struct Echo {
      calls: AtomicUsize,
   }

   impl RecommendationClient for Echo {
      fn recommend(&self, lines: Vec<CartLine>) -> BoxFuture<'_, Result<Recommendation, String>> {
         self.calls.fetch_add(1, Ordering::SeqCst);
         Box::pin(async move {
            Ok(Recommendation {
               health_warnings: vec![format!("{} lines", lines.len())],
               ..Default::default()
            })
         })
      }

      fn ask(&self, message: String, lines: Vec<CartLine>) -> BoxFuture<'_, Result<String, String>> {
         Box::pin(async move { Ok(format!("{} with {} lines", message, lines.len())) })
      }
   }

   // Never answers
   struct Silent;

   impl RecommendationClient for Silent {
      fn recommend(&self, _lines: Vec<CartLine>) -> BoxFuture<'_, Result<Recommendation, String>> {
         Box::pin(futures::future::pending::<Result<Recommendation, String>>())
      }

      fn ask(&self, _message: String, _lines: Vec<CartLine>) -> BoxFuture<'_, Result<String, String>> {
         Box::pin(futures::future::pending::<Result<String, String>>())
      }
   }

   struct Shelf {
      products: Vec<Product>,
   }

   impl CatalogClient for Shelf {
      fn list(&self) -> BoxFuture<'_, Result<Vec<Product>, String>> {
         Box::pin(async move { Ok(self.products.clone()) })
      }

      fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Product>, String>> {
         Box::pin(async move {
            if query == "fail" {
               return Err(String::from("search: connection refused"));
            }
            Ok(self.products.iter().filter(|p| p.id.contains(query)).cloned().collect::<Vec<_>>())
         })
      }
   }

   fn product(id: &str) -> Product {
      Product::sample(id, Category::Fruits, 1.0, NutritionProfile::default())
   }

   fn shelf() -> Arc<Shelf> {
      Arc::new(Shelf { products: vec![product("apple"), product("banana"), product("pineapple")] })
   }

   fn session_with(recommender: Arc<dyn RecommendationClient>, timeout: Duration) -> (Session, mpsc::UnboundedReceiver<Refresh>) {
      Session::new(shelf(), recommender, timeout)
   }

   #[tokio::test]
   async fn stale_refresh_is_discarded() {
      let (mut session, mut rx) = session_with(Arc::new(Echo::default()), Duration::from_secs(5));
      session.add(product("a"));
      session.add(product("b"));
      session.add(product("c"));

      let mut done = Vec::new();
      for _ in 0..3 {
         done.push(rx.recv().await.unwrap());
      }

      // Deliver the newest first, older ones arrive later
      done.sort_by_key(|r| std::cmp::Reverse(r.revision));
      let applied: Vec<bool> = done.into_iter().map(|r| session.apply(r)).collect();
      assert_eq!(applied, [true, false, false]);

      assert_eq!(session.panels().health_warnings, ["3 lines"]);
      assert!(!session.is_loading());
   }

   #[tokio::test]
   async fn answer_for_older_cart_is_ignored() {
      let (mut session, mut rx) = session_with(Arc::new(Echo::default()), Duration::from_secs(5));
      session.add(product("a"));
      let first = rx.recv().await.unwrap();
      session.add(product("b"));
      session.set_quantity("b", 3);

      assert!(!session.apply(first));
      assert!(session.panels().health_warnings.is_empty());
      assert!(session.is_loading());
   }

   #[tokio::test]
   async fn emptied_cart_resets_panels_without_request() {
      let echo = Arc::new(Echo::default());
      let (mut session, mut rx) = session_with(echo.clone(), Duration::from_secs(5));
      session.add(product("a"));
      let refresh = rx.recv().await.unwrap();
      assert!(session.apply(refresh));
      assert!(!session.panels().health_warnings.is_empty());

      session.decrement("a");
      assert!(session.cart().is_empty());
      assert_eq!(session.panels(), &Recommendation::default());
      assert_eq!(echo.calls.load(Ordering::SeqCst), 1);

      // No-op mutations do not ask again
      session.remove("a");
      session.clear();
      assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
   }

   #[tokio::test]
   async fn timeout_keeps_previous_panels() {
      let (mut session, mut rx) = session_with(Arc::new(Silent), Duration::from_millis(20));
      session.add(product("a"));
      let refresh = rx.recv().await.unwrap();
      assert!(refresh.result.is_err());
      assert!(!session.apply(refresh));
      assert_eq!(session.panels(), &Recommendation::default());
      assert!(!session.is_loading());

      assert_eq!(session.ask("recipes?").await, None);
   }

   #[tokio::test]
   async fn failed_refresh_keeps_previous_panels() {
      let (mut session, _rx) = session_with(Arc::new(Echo::default()), Duration::from_secs(5));
      session.add(product("a"));
      let revision = session.cart().revision();
      assert!(session.apply(Refresh { revision, result: Ok(Recommendation { health_warnings: vec![String::from("old")], ..Default::default() }) }));

      assert!(!session.apply(Refresh { revision, result: Err(String::from("recommend: 500")) }));
      assert_eq!(session.panels().health_warnings, ["old"]);
   }

   #[tokio::test]
   async fn search_and_offer() {
      let (mut session, _rx) = session_with(Arc::new(Echo::default()), Duration::from_secs(5));
      assert_eq!(session.load_catalog().await.len(), 3);
      assert_eq!(session.offer().len(), 3);

      let found: Vec<String> = session.search("apple").await.iter().map(|p| p.id.clone()).collect();
      assert_eq!(found, ["apple", "pineapple"]);
      assert_eq!(session.offer().len(), 2);

      // Adding a product closes the search
      let pick = session.offer()[1].clone();
      session.add(pick);
      assert_eq!(session.offer().len(), 3);
      assert_eq!(session.cart().get("pineapple").unwrap().quantity, 1);

      assert!(session.search("fail").await.is_empty());
      assert!(session.search("  ").await.is_empty());
      assert_eq!(session.find("banana").map(|p| p.id), Some(String::from("banana")));
      assert_eq!(session.find("kiwi"), None);
   }

   #[tokio::test]
   async fn assistant_sees_cart() {
      let (mut session, _rx) = session_with(Arc::new(Echo::default()), Duration::from_secs(5));
      session.add(product("a"));
      assert_eq!(session.ask("recipes?").await.as_deref(), Some("recipes? with 1 lines"));
   }
}
