//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the ownership-transfer protocol and
//!   the fixed seed procedure.
//! - Keep dispatch/CLI layers decoupled from storage details.

pub mod bootstrap;
pub mod transfer_service;
