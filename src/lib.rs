// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::explicit_counter_loop)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::redundant_guards)]
#![allow(clippy::regex_creation_in_loops)]
#![allow(clippy::manual_find)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # pagedown
//!
//! Layout-aware reconstruction engine that turns a page's glyph stream into
//! clean Markdown: columns, tables, headings, lists, and Unicode math.
//!
//! ## Pipeline
//!
//! A page passes through ten components, in order: the [`line`] builder
//! groups glyphs into lines; [`layout::column_detector`] finds columns;
//! [`layout::block_grouper`] groups lines into blocks; [`layout::classifier`]
//! labels each block; [`tables`] promotes `potential-table` blocks to
//! [`tables::Table`]s; [`mathtext`] re-renders embedded Unicode math as
//! LaTeX; [`emitter`] walks the classified blocks and writes Markdown;
//! [`normalize`] runs once over the whole document to strip repeating
//! headers/footers and repair hyphenation; [`garbled`] flags pages whose
//! glyph extraction looks like mojibake; [`merger`] orchestrates all of the
//! above.
//!
//! The engine never parses a PDF or calls a vision model itself — see
//! [`adapters`] for the two collaborator traits a host application
//! implements.

pub mod adapters;
pub mod config;
pub mod emitter;
pub mod error;
pub mod garbled;
pub mod geometry;
pub mod glyph;
pub mod layout;
pub mod line;
pub mod mathtext;
pub mod merger;
pub mod normalize;
pub mod tables;
pub mod textstats;
