//! Stochastic Brusselator ensembles and their density heatmaps
//!
//! - `core`: path simulation, `.brus` datasets, histogramming, colour mapping
//! - `app` (feature `viewer`): animated side-by-side comparison of two datasets

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod theme;

pub use error::{Error, Result};
