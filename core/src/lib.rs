//! Civic Desk: a turn-based city-management simulation engine.
//!
//! A `SimEngine` owns one city. The player enacts policies, answers city
//! events and advances the year; every change is clamped back into range
//! and journaled.

pub mod annual_report_subsystem;
pub mod city_event;
pub mod command;
pub mod condition;
pub mod config;
pub mod delayed_effect_subsystem;
pub mod effect;
pub mod engine;
pub mod error;
pub mod event;
pub mod growth_subsystem;
pub mod policy;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod store;
pub mod subsystem;
pub mod types;
