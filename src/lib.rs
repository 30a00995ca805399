//! A two-player chess game: board geometry, piece movement, turn order and board mutation, plus a
//! console front end for playing it.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::unwrap_used)]

pub mod chess;
pub mod config;
pub mod console;
pub mod store;
