//! ECS resources made available to systems.
//!
//! Overview
//! - `dispatcher` – lazy, once-per-scene installation of shared updates and the tick phases
//! - `gameconfig` – INI-backed settings
//! - `imagestore` – image sizes by key
//! - `registry` – per-entity behavior facets, scene scoped
//! - `screensize` – scene size in pixels
//! - `tilemap` – grid of tile images and walls
//! - `worldtime` – simulation time and delta
pub mod dispatcher;
pub mod gameconfig;
pub mod imagestore;
pub mod registry;
pub mod screensize;
pub mod tilemap;
pub mod worldtime;
