//! davmirror synchronization engine
//!
//! Turns a fresh remote listing and the persisted manifest into a minimal
//! set of transfers, executes them with a bounded worker pool, and
//! persists the advanced manifest:
//!
//! ```text
//! IRemoteLister ──→ content tree ──→ PathIndex ──┐
//!                                                ├──→ differ ──→ scheduler ──→ summary
//! ManifestStore ──→ manifest snapshot ───────────┘                  │
//!         ▲                                                         │
//!         └───────────── persisted after a non-dry-run pass ────────┘
//! ```
//!
//! Partial failures never abort a pass: a failed transfer keeps its old
//! manifest entry and is re-classified as a fetch on the next invocation.

pub mod differ;
pub mod engine;
pub mod manifest;
pub mod scheduler;
pub mod script;

pub use engine::SyncEngine;
pub use manifest::ManifestStore;
