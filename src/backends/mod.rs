// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor implementations for The Conduit.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process processors, registered by name through
//! [`LocalProcessorFactory`](local::LocalProcessorFactory):
//! - **Float operations**: multiply, add, divide, format as text
//! - **Text operations**: case conversion, prefix/suffix addition
//! - **Probes**: float value, data type tag
//! - **Sources and sinks**: constant float, float with context, logging sinks
//! - **Context mutators**: `rename:`, `delete:` and `template:` shorthands
//!
//! ## Stub Backend (Test-Only)
//! Processors that fail, panic, lie about their output type or record what
//! they saw. Only compiled for tests.
//!
//! # Example
//! ```rust
//! use the_conduit::config::{NodeConfig, ProcessorRegistry};
//! use the_conduit::data::{Payload, TypedData};
//! use the_conduit::engine::Pipeline;
//!
//! let registry = ProcessorRegistry::with_builtins();
//! let nodes = vec![NodeConfig::new("float_multiply").with_parameter("factor", 2.0)];
//! let mut pipeline = Pipeline::new(&nodes, &registry)?;
//! let out = pipeline.process(Payload::from_data(TypedData::float(3.0)?))?;
//! assert_eq!(out.data.as_float(), Some(6.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
