//! Sitegen: Build Rules for Site Generation
//!
//! Turns site-description files into registered actions in a host build graph.
//! A single-site request is validated, its output directories are prepared, and
//! one generation action is registered. A package request discovers every
//! `*.building.yaml` under a root and does the same per site, plus one
//! aggregate package action.

pub mod cli;
pub mod config;
pub mod context;
pub mod discover;
pub mod error;
pub mod graph;
pub mod logging;
pub mod package;
pub mod pipeline;
pub mod planner;
pub mod registrar;
pub mod types;
pub mod validate;
