// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use super::{Context, TypedData};

/// The unit passed between pipeline nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: TypedData,
    pub context: Context,
}

impl Payload {
    pub fn new(data: TypedData, context: Context) -> Self {
        Self { data, context }
    }

    pub fn from_data(data: TypedData) -> Self {
        Self::new(data, Context::new())
    }
}
