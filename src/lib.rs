#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod bridge;
pub mod config;
pub mod inventory;
pub mod loading;
pub mod loading_error;
pub mod loading_result;
pub mod plate;
pub mod weight;

pub use loading::{Loader, SearchLimits, compute_loading};
