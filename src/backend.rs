/* ===============================================================================
Smart basket advisor.
HTTP access to the catalog and recommendation service. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::environment::Vars;

// Client is a pool inside, cloning is cheap
#[derive(Clone)]
pub struct Backend {
   client: reqwest::Client,
   base_url: String,
}

impl Backend {
   pub fn new(vars: &Vars) -> Result<Self, String> {
      let client = reqwest::Client::builder()
      .timeout(vars.timeout)
      .build()
      .map_err(|err| format!("backend client: {}", err))?;

      Ok(Self {
         client,
         base_url: vars.api_url.clone(),
      })
   }

   fn url(&self, path: &str) -> String {
      format!("{}{}", self.base_url, path)
   }

   pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, String>
   where T: DeserializeOwned
   {
      // Send request
      let response = self.client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|err| format!("get {}: {}", path, err))?;

      // Decode answer
      response
      .json::<T>()
      .await
      .map_err(|err| format!("get {} decode: {}", path, err))
   }

   pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, String>
   where B: Serialize + ?Sized,
      T: DeserializeOwned
   {
      let response = self.client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|err| format!("post {}: {}", path, err))?;

      response
      .json::<T>()
      .await
      .map_err(|err| format!("post {} decode: {}", path, err))
   }

   // Greeting from the service root, to check it is alive
   pub async fn ping(&self) -> Result<String, String> {
      #[derive(Deserialize)]
      struct Greeting {
         #[serde(default)]
         message: String,
      }

      let greeting: Greeting = self.get("/", &[]).await?;
      Ok(greeting.message)
   }
}
