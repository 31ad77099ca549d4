//! # line_core - Conductor-Line Configurator Engine
//!
//! `line_core` is the calculation engine behind a conductor-line
//! ("electrified crane/conveyor rail") configurator. It turns the
//! parameters of an installation - load units, powers, distance, voltage -
//! into recommended cable sizing, accessory catalog references and
//! voltage-drop diagnostics.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: calculators are pure functions of the form state
//! - **JSON-First**: all public types implement Serialize/Deserialize
//! - **No-result over NaN**: insufficient data flows as `Option::None`;
//!   a NaN never reaches a rendered output
//! - **Business outcomes aren't errors**: demand above the catalog ladder
//!   is a "consult the technical department" result, not a failure
//!
//! ## Quick Start
//!
//! ```rust
//! use line_core::derived::derive;
//! use line_core::form::PowerGroup;
//! use line_core::session::Session;
//!
//! let mut session = Session::new();
//! session.form_mut().voltage = Some(380.0);
//! session.form_mut().total_distance = Some(100.0);
//!
//! let mut hoist = PowerGroup::default();
//! hoist.set_kw(Some(30.0));
//! session.grua_mut(0).unwrap().set_service("elevacion", hoist);
//!
//! let values = derive(&session);
//! assert_eq!(values.line_rating.unwrap().to_string(), "60");
//! ```
//!
//! ## Modules
//!
//! - [`session`] - session container (form + load units + metadata)
//! - [`form`] - form state, load units, per-service power triples
//! - [`validation`] - field validity and form completeness
//! - [`calculations`] - the calculator chain (power, current, accessories,
//!   supports, voltage drop)
//! - [`derived`] - one eager derivation pass over a whole session
//! - [`submission`] - mail-relay payload and in-flight guard
//! - [`errors`] - structured error types

pub mod calculations;
pub mod derived;
pub mod errors;
pub mod form;
pub mod session;
pub mod submission;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{DropVerdict, RatingSelection};
pub use derived::{derive, derive_values, DerivedValues};
pub use errors::{ConfigError, ConfigResult};
pub use form::{FormState, LoadGroup, PowerGroup};
pub use session::Session;
