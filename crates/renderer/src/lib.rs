// Copyright (C) 2026 Microcosm Labs
// SPDX-License-Identifier: MIT

//! Renders TON sandbox execution traces as Mermaid sequence diagrams.
//!
//! Each outbound message in the trace becomes one diagram edge, annotated
//! with its operation code, attached value and an ABI-decoded summary of its
//! bit-packed body.

pub mod abi;
pub mod cell;
pub mod consts;
pub mod decode;
pub mod diagram;
pub mod input;
pub mod logging;
pub mod slice;
pub mod trace;

pub use abi::{ContractAbi, ContractRegistry, TypeSchema};
pub use cell::{Cell, CellBuilder, CellError};
pub use diagram::{DisplayNames, RenderOptions, format_coins, render_mermaid, shorten_address};
pub use slice::{CellSlice, CursorError};
pub use trace::{ComputePhase, Message, Trace, Transaction};
