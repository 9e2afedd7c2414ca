/* ===============================================================================
Smart basket advisor.
Main module. 19 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::sync::Arc;
use derive_more::From;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::LinesStream, StreamExt};

mod environment;
mod product;
mod cart;
mod nutrition;
mod advice;
mod checkout;
mod backend;
mod catalog;
mod recommend;
mod session;
mod basket;
mod commands;

use crate::backend::Backend;
use crate::session::{Refresh, Session};

// What wakes up the main loop
#[derive(From)]
enum Event {
   Input(String),
   Refresh(Refresh),
}

// ============================================================================
// [Run!]
// ============================================================================
#[tokio::main]
async fn main() {
   run().await;
}

async fn run() {
   pretty_env_logger::init();

   log::info!("Starting...");

   // Settings from environments
   let vars = environment::Vars::from_env();
   let timeout = vars.timeout;
   let backend = match Backend::new(&vars) {
      Ok(backend) => Arc::new(backend),
      Err(e) => {
         log::error!("main::run {}", e);
         return;
      }
   };
   if environment::VARS.set(vars).is_err() {
      log::info!("Something wrong with settings, they were already set");
   }

   // Service is optional, without it there is only the local cart
   match backend.ping().await {
      Ok(message) => log::info!("Backend says: {}", message),
      Err(e) => log::warn!("Backend is not available: {}", e),
   }

   let (mut session, mut refreshes) = Session::new(backend.clone(), backend, timeout);
   let count = session.load_catalog().await.len();
   log::info!("Catalog loaded, {} products", count);

   println!("{}\n", basket::header(session.cart()));
   println!("{}\n", basket::tips_text(&advice::tips(session.cart().lines())));
   println!("{}", basket::help_text());

   let stdin = BufReader::new(io::stdin());
   let mut lines = LinesStream::new(stdin.lines());

   loop {
      let event: Event = tokio::select! {
         line = lines.next() => match line {
            Some(Ok(line)) => line.into(),
            Some(Err(e)) => {
               log::error!("main::run input: {}", e);
               break;
            }
            None => break,
         },
         Some(refresh) = refreshes.recv() => refresh.into(),
      };

      match event {
         Event::Input(text) => {
            match commands::update(&mut session, &text).await {
               Some(reply) => println!("{}\n", reply),
               None => break,
            }
         }
         Event::Refresh(refresh) => {
            if session.apply(refresh) {
               println!("{}\n", basket::panels_text(session.panels(), session.is_loading()));
            }
         }
      }
   }

   log::info!("Bye");
}
