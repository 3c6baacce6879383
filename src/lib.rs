//! secfolio library
//!
//! A security consultant's portfolio site with runtime-selectable color
//! palettes, dark/light modes, and page layouts. The selections are persisted
//! per client and applied through a shared styling surface that every
//! rendered section reads.

pub mod branding;
pub mod cli;
pub mod config;
pub mod contact;
pub mod models;
pub mod presentation;
pub mod storage;
pub mod theme;

#[cfg(feature = "web")]
pub mod web;
