//! Caseflow - Conversational Complaint Intake and Resolution Engine
//!
//! This crate implements a bounded, multi-turn complaint interview with
//! voice endpointing, structured turn-by-turn extraction, escalation
//! gating, and procedural plan execution.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
