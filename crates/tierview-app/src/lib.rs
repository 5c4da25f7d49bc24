// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod focus;
pub mod layout;
pub mod model;
pub mod pane;
pub mod parser;
pub mod source;
pub mod state;

pub use focus::*;
pub use layout::*;
pub use model::*;
pub use pane::*;
pub use parser::*;
pub use source::*;
pub use state::*;
