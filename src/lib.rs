//! Polling and result normalization for long-running remote generation jobs.
//!
//! A job submitted to a provider (Runway, D-ID) is polled by the
//! [`PollingEngine`](polling::PollingEngine) until it reaches a terminal
//! [`Outcome`](polling::Outcome). Provider differences live entirely in a
//! [`ProviderAdapter`](polling::ProviderAdapter).

pub mod cli;
pub mod config;
pub mod error;
pub mod polling;
pub mod providers;
pub mod services;
pub mod ui;
