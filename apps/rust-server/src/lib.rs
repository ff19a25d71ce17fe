// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Todo Lists Gateway - Authenticated List, Notification and Key Service
//!
//! Every request is validated against the identity service before it is
//! delegated to the list or account backend, or served from the local
//! document store (push subscriptions and decode keys).
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Identity headers and validation
//! - `backend` - Identity, list and account service clients
//! - `delegate` - Backend status interpretation
//! - `keys` - Decode key derivation (scrypt)
//! - `notifications` - Web push subscriptions and delivery
//! - `storage` - JSON document store

pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod delegate;
pub mod error;
pub mod keys;
pub mod models;
pub mod notifications;
pub mod state;
pub mod storage;
