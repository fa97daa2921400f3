// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthowire: orthogonal wire routing and interactive path editing for circuit canvases.
//!
//! [`route`] plans obstacle-avoiding Manhattan paths; [`session`] turns pointer
//! events into wire edits that keep every segment horizontal or vertical and
//! keep wire ends glued to moving terminals.

pub mod config;
pub mod demo;
pub mod model;
pub mod ops;
pub mod query;
pub mod route;
pub mod session;
pub mod store;
