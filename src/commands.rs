/* ===============================================================================
Smart basket advisor.
Text commands of the shell. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use strum::EnumString;

use crate::advice;
use crate::basket;
use crate::checkout;
use crate::session::Session;

// Commands without arguments
#[derive(EnumString, Clone, Copy, PartialEq, Debug)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Word {
   List,
   Cart,
   Tips,
   Recs,
   Checkout,
   Pay,
   Clear,
   Help,
   #[strum(serialize = "exit", serialize = "quit")]
   Exit,
}

// Commands with arguments
#[derive(EnumString, Clone, Copy)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
   Search,
   Add,
   Del,
   Qty,
   Ask,
}

lazy_static! {
   static ref WITH_ARGS: Regex = Regex::new(r"^(\w+)\s+(.+)$").unwrap();
   static ref QUANTITY: Regex = Regex::new(r"^(\S+)\s+([+-]?\d+)$").unwrap();
   static ref STEP: Regex = Regex::new(r"^([+-])(\S+)$").unwrap();
}

// Product reference in "add"
#[derive(Clone, PartialEq, Debug)]
pub enum Pick {
   Number(usize), // 1-based position in the last list
   Id(String),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Command {
   List,
   Cart,
   Tips,
   Recs,
   Checkout,
   Pay,
   Clear,
   Help,
   Exit,
   Search(String),
   Add(Pick),
   Delete(String),
   Quantity(String, i64),
   Inc(String),
   Dec(String),
   Ask(String),
}

impl Command {
   pub fn parse(s: &str) -> Self {
      let s = s.trim();

      // Try as command without arguments
      if let Ok(word) = Word::from_str(s) {
         return match word {
            Word::List => Self::List,
            Word::Cart => Self::Cart,
            Word::Tips => Self::Tips,
            Word::Recs => Self::Recs,
            Word::Checkout => Self::Checkout,
            Word::Pay => Self::Pay,
            Word::Clear => Self::Clear,
            Word::Help => Self::Help,
            Word::Exit => Self::Exit,
         };
      }

      // Quantity step like +apple_001
      if let Some(caps) = STEP.captures(s) {
         let id = caps[2].to_string();
         return if &caps[1] == "+" { Self::Inc(id) } else { Self::Dec(id) };
      }

      // Looking for the commands with arguments
      if let Some(caps) = WITH_ARGS.captures(s) {
         let arg = caps[2].trim();
         if let Ok(verb) = Verb::from_str(&caps[1]) {
            match verb {
               Verb::Search => return Self::Search(arg.to_string()),
               Verb::Ask => return Self::Ask(arg.to_string()),
               Verb::Del => return Self::Delete(arg.to_string()),
               Verb::Add => {
                  let pick = match arg.parse::<usize>() {
                     Ok(n) => Pick::Number(n),
                     Err(_) => Pick::Id(arg.to_string()),
                  };
                  return Self::Add(pick);
               }
               Verb::Qty => {
                  if let Some(caps) = QUANTITY.captures(arg) {
                     // Too big numbers are saturated
                     let n = caps[2].parse::<i64>()
                     .unwrap_or(if caps[2].starts_with('-') { i64::MIN } else { i64::MAX });
                     return Self::Quantity(caps[1].to_string(), n);
                  }
               }
            }
         }
      }

      // Anything else is text to search
      Self::Search(s.to_string())
   }
}

// Executes the command and returns text to show, None to quit
pub async fn update(session: &mut Session, input: &str) -> Option<String> {
   let cmd = Command::parse(input);
   let text = match cmd {
      Command::Exit => return None,

      Command::Help => basket::help_text(),

      Command::List => {
         let products = session.load_catalog().await;
         basket::products_text(products)
      }

      Command::Search(query) => {
         let found = session.search(&query).await;
         basket::products_text(found)
      }

      Command::Add(pick) => {
         let product = match &pick {
            Pick::Number(n) => n.checked_sub(1).and_then(|i| session.offer().get(i)).cloned(),
            Pick::Id(id) => session.find(id),
         };
         match product {
            Some(product) => {
               let name = product.name.clone();
               session.add(product);
               format!("Added {}\n{}", name, basket::header(session.cart()))
            }
            None => String::from("No such product, type 'list' or search first"),
         }
      }

      Command::Delete(id) => {
         session.remove(&id);
         cart_view(session)
      }

      Command::Quantity(id, n) => {
         session.set_quantity(&id, n);
         cart_view(session)
      }

      Command::Inc(id) => {
         session.increment(&id);
         cart_view(session)
      }

      Command::Dec(id) => {
         session.decrement(&id);
         cart_view(session)
      }

      Command::Cart => cart_view(session),

      Command::Tips => basket::tips_text(&advice::tips(session.cart().lines())),

      Command::Recs => basket::panels_text(session.panels(), session.is_loading()),

      Command::Ask(message) => {
         match session.ask(&message).await {
            Some(answer) => answer,
            None => String::from("Assistant is unavailable, try again later"),
         }
      }

      Command::Checkout => {
         if session.cart().is_empty() {
            String::from("Your cart is empty")
         } else {
            basket::checkout_text(&session.checkout())
         }
      }

      Command::Pay => {
         if session.cart().is_empty() {
            String::from("Nothing to pay for")
         } else {
            let checkout = session.checkout();
            checkout::pay(&checkout);
            String::from("Payment is not available in this version, your cart is kept")
         }
      }

      Command::Clear => {
         session.clear();
         cart_view(session)
      }
   };

   Some(text)
}

fn cart_view(session: &Session) -> String {
   format!("{}\n\n{}", basket::header(session.cart()), basket::cart_text(session.cart()))
}
