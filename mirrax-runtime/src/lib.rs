// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `mirrax-runtime` library provides a runtime environment for the Mirrax system.
///
/// This library contains modules for core functionality, the facility topology, the
/// hardware registry, telemetry simulation, the digital twin state, services, and the
/// vision backend. It also exports the `config` module and re-exports the `rand` crate.
///
/// The `runtime` module provides the `Runtime` struct and the `Error` enum for managing
/// the Mirrax runtime. The `consts` module defines various constants used in the runtime,
/// such as the version, default network port, frame queue size, and report interval.
///
/// The `TwinState` struct represents the authoritative state of the digital twin. It
/// includes the hardware registry, the facility topology, the latest telemetry snapshot,
/// the view state, and the image analysis state. Services mutate the twin through the
/// shared handle and publish frames to connected renderers.
pub mod core;
pub mod facility;
pub mod registry;
pub mod service;
pub mod sim;
pub mod twin;
pub mod vision;

#[macro_use]
extern crate log;

mod config;

pub use self::config::*;

pub use rand;

pub mod runtime;
pub use self::runtime::Error;
pub use self::runtime::Runtime;

static INSTANCE: std::sync::OnceLock<core::Instance> = std::sync::OnceLock::new();

pub mod global {
    #[inline]
    pub fn instance() -> &'static crate::core::Instance {
        crate::INSTANCE.get().unwrap()
    }

    #[inline]
    pub fn set_instance(instance: crate::core::Instance) {
        crate::INSTANCE.set(instance).unwrap();
    }
}

/// Mirrax runtime module containing various constants.
pub mod consts {
    use std::time::Duration;

    /// Mirrax runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::VERSION;
    ///
    /// println!("Mirrax runtime version: {}", VERSION);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the version of the Mirrax runtime.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Mirrax runtime major version.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::VERSION_MAJOR;
    ///
    /// println!("Mirrax runtime major version: {}", VERSION_MAJOR);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the major version of the Mirrax runtime.
    pub const VERSION_MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");

    /// Mirrax runtime minor version.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::VERSION_MINOR;
    ///
    /// println!("Mirrax runtime minor version: {}", VERSION_MINOR);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the minor version of the Mirrax runtime.
    pub const VERSION_MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");

    /// Mirrax runtime patch version.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::VERSION_PATCH;
    ///
    /// println!("Mirrax runtime patch version: {}", VERSION_PATCH);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the patch version of the Mirrax runtime.
    pub const VERSION_PATCH: &str = env!("CARGO_PKG_VERSION_PATCH");

    /// Mirrax default network port for TCP.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::DEFAULT_NETWORK_PORT;
    ///
    /// println!("Mirrax default network port: {}", DEFAULT_NETWORK_PORT);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the default network port for TCP in the Mirrax runtime.
    pub const DEFAULT_NETWORK_PORT: u16 = 30_061;

    /// Mirrax default queue size for frames.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::QUEUE_SIZE_FRAME;
    ///
    /// println!("Mirrax default queue size for frames: {}", QUEUE_SIZE_FRAME);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the default queue size for frames in the Mirrax runtime.
    /// Renderers that fall behind skip ahead to the latest frame.
    pub const QUEUE_SIZE_FRAME: usize = 16;

    /// Mirrax facility report interval.
    ///
    /// # Example
    ///
    /// ```
    /// use mirrax::consts::SERVICE_REPORT_INTERVAL;
    /// use std::time::Duration;
    ///
    /// println!("Mirrax facility report interval: {:?}", SERVICE_REPORT_INTERVAL);
    /// ```
    ///
    /// # Remarks
    ///
    /// This constant represents the interval for the Mirrax facility reporter.
    pub const SERVICE_REPORT_INTERVAL: Duration = Duration::from_secs(30);
}
