//! marketlens — offline equity market analysis pipeline.
//!
//! Loads historical daily prices for an equity universe plus two macro
//! indicators, decomposes the co-movement of daily returns into principal
//! components, detects 50/200-day moving-average crossovers, and emits a
//! markdown report with an explained-variance chart.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
