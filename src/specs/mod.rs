// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping specifications** for the
//! scoreboard site. Each spec focuses on a single page shape and encodes
//! *where the ground truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML extraction** for the weekly scoreboard page.
//! - **Selector choice & precedence** (which tag/class combination feeds which
//!   record field, and how away/home ancestry is decided).
//! - **Light shaping** of results into record structs the runner can order
//!   and serialize.
//!
//! ## What does **not** live here
//! - **File/network I/O** — the runner resolves and caches source documents.
//! - **Ordering, CSV formatting, output paths** — runner and `file`/`csv`.
//!
//! ## Conventions & invariants
//! - Case-insensitive tag detection; class matching is token membership
//!   against the space-split class attribute, never substring.
//! - Specs are testable **offline** against short synthetic documents.
pub mod schedule;
