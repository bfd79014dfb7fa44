//! # Richnote Architecture
//!
//! Richnote is a **UI-agnostic rich-text note library**. The bundled CLI is one
//! client of it; a desktop or web front end would drive the exact same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes selectors (positions, id prefixes → UUIDs)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, returning CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model                                                      │
//! │  - Document, Span, AttributeSet, EditCommand                │
//! │  - HistoryManager + EditorSession (undo/redo)               │
//! │  - Note, NoteStore, StorageBackend (fs / memory)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Document Model
//!
//! A [`document::Document`] is a plain string plus an ordered list of
//! [`document::Span`]s that tile it exactly: no gaps, no overlaps, and no two
//! neighbours with equal attributes. Offsets everywhere are counted in
//! `char`s, never bytes.
//!
//! Every edit is an [`command::EditCommand`] value built from the current
//! document and carrying whatever it needs to be undone. Building a command
//! never mutates anything; `apply` and `invert` are all-or-nothing.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process, and reports every failure as a [`error::NoteError`]. Diagnostics
//! go through the `log` facade; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`attributes`]: `AttributeSet` and style presets
//! - [`document`]: `Document`, `Span`, command construction and application
//! - [`command`]: The `EditCommand` value type
//! - [`history`]: Bounded undo/redo stacks
//! - [`session`]: One document plus its history
//! - [`model`]: `Note`
//! - [`store`]: `NoteStore`, storage backends and the on-disk schema
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod command;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod model;
pub mod session;
pub mod store;
