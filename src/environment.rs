/* ===============================================================================
Smart basket advisor.
Global vars from environment. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use once_cell::sync::{OnceCell};
use smart_default::SmartDefault;
use std::{env, time::Duration};

// Settings
pub static VARS: OnceCell<Vars> = OnceCell::new();

// Enviroment variables
#[derive(SmartDefault, Debug, Clone)]
pub struct Vars {
   // Backend with catalog and recommendations, without trailing slash
   #[default(String::from("http://localhost:8000"))]
   pub api_url: String,

   // Limit for every request to backend
   #[default(Duration::from_secs(10))]
   pub timeout: Duration,

   // Price prefix
   #[default(String::from("$"))]
   pub price_unit: String,
}

impl Vars {
   pub fn from_env() -> Self {
      let default = Self::default();

      Vars {
         api_url: {
            match env::var("BASKET_API_URL") {
               Ok(s) if !s.trim().is_empty() => {
                  let s = s.trim().trim_end_matches('/').to_string();
                  log::info!("backend is {}", s);
                  s
               }
               Ok(_) => {
                  log::info!("Environment variable BASKET_API_URL is empty, using {}", default.api_url);
                  default.api_url
               }
               Err(_) => {
                  log::info!("There is no environment variable BASKET_API_URL, using {}", default.api_url);
                  default.api_url
               }
            }
         },

         timeout: {
            match env::var("REQUEST_TIMEOUT") {
               Ok(s) => match s.trim().parse::<u64>() {
                  Ok(n) if n > 0 => Duration::from_secs(n),
                  Ok(_) => {
                     log::warn!("REQUEST_TIMEOUT must be positive, using {:?}", default.timeout);
                     default.timeout
                  }
                  Err(e) => {
                     log::warn!("Something wrong with REQUEST_TIMEOUT: {}", e);
                     default.timeout
                  }
               }
               Err(_) => default.timeout // if the variable is not set, that's ok
            }
         },

         price_unit: {
            match env::var("PRICE_UNIT") {
               Ok(s) => s,
               Err(_) => default.price_unit,
            }
         },
      }
   }
}

// Settings from environment or defaults if not loaded yet
pub fn vars() -> &'static Vars {
   VARS.get_or_init(Vars::default)
}

// Price with units, always two decimals
pub fn price_with_unit(price: f64) -> String {
   format!("{}{:.2}", vars().price_unit, price)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn defaults() {
      let vars = Vars::default();
      assert_eq!(vars.api_url, "http://localhost:8000");
      assert_eq!(vars.timeout, Duration::from_secs(10));
      assert_eq!(vars.price_unit, "$");
   }

   #[test]
   fn price_has_two_decimals() {
      let s = price_with_unit(108.0);
      assert!(s.ends_with("108.00"), "{}", s);
      assert!(price_with_unit(2.999).ends_with("3.00"));
   }
}
