// doajsync - DOAJ article metadata synchronization tool
// Copyright (c) 2026 doajsync Contributors
// Licensed under the MIT License

//! # doajsync - DOAJ article metadata synchronization
//!
//! doajsync keeps a publishing platform's article metadata in step with
//! the Directory of Open Access Journals (DOAJ). It pushes published
//! articles into the registry, reconciles existing registry records with
//! local articles by DOI, and audits every deposit attempt.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Pushing** article metadata to DOAJ, creating or updating one
//!   registry record per article
//! - **Searching** the registry with paginated, throttled queries
//! - **Reconciling** registry records with local articles in either
//!   direction
//! - **Auditing** every push and delete attempt in an append-only
//!   deposit log
//!
//! ## Architecture
//!
//! doajsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (push orchestration, reconciliation,
//!   metadata transforms)
//! - [`adapters`] - External integrations (DOAJ API, local article store)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doajsync::adapters::doaj::HttpCore;
//! use doajsync::adapters::store::{ArticleStore, MemoryStore};
//! use doajsync::config::load_config;
//! use doajsync::core::{PushOptions, Pusher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("doajsync.toml")?;
//!     let http = Arc::new(HttpCore::new(&config.doaj)?);
//!     let store = Arc::new(MemoryStore::from_json_file("articles.json")?);
//!
//!     let pusher = Pusher::new(http, store.clone(), PushOptions {
//!         push_enabled: config.doaj.push_enabled,
//!         dry_run: config.application.dry_run,
//!         recreate_on_immutable_change: config.doaj.recreate_on_immutable_change,
//!     });
//!
//!     let articles = store.published_articles().await?;
//!     let summary = pusher.push_batch(&articles, false).await?;
//!     println!("Pushed {} article(s)", summary.pushed.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
