//! Rule-based field resolution for service-locator dependency injection.
//!
//! A [`Target`] is a record, a tuple-like record, or a function whose fields
//! are filled in from a [`Scope`] before it is constructed or called. Each
//! field is handed to an ordered list of rules, and the first rule that does
//! not skip decides where the field's value comes from:
//!
//! 1. Fields the target populates itself are left out of construction.
//! 2. Values passed explicitly as props win over everything else.
//! 3. A field declared as the scope's own type receives the scope.
//! 4. Fields without an annotation are looked up in the scope by type.
//! 5. Annotated fields run their chain of operators.
//!
//! If nothing produces a value, the field's default is used. A field with no
//! default and no value is an error.
//!
//! By default, values are held in `Arc<T>` and services must be `Send + Sync`.
//! Disable default features and enable the "rc" feature to use `Rc<T>`
//! instead:
//!
//! ```text
//! field_injector = {
//!     version = "*",
//!     default_features = false,
//!     features = ["rc"]
//! }
//! ```
//!
//! # Operators
//!
//! Annotated fields describe where their value comes from as a pipeline of
//! operators. Each operator receives the outcome of the one before it:
//!
//! - [`FetchFromScope`] looks up a service by type, optionally plucking an
//!   attribute off of it.
//! - [`PluckAttribute`] reads an attribute off of the previous value.
//! - [`FetchRequestContext`] gets the scope's request context.
//! - [`ReadFieldDefault`] reads the default of a field on the target.
//!
//! Any operator reporting a configuration error stops the pipeline, and the
//! error is returned from [`resolve`] with the target, field, and origin of
//! the failure.
//!
//! # Example
//!
//! ```
//! use field_injector::{
//!     props, Annotation, Attributes, FetchFromScope, FetchRequestContext,
//!     FieldSpec, Injectable, PluckAttribute, Registry, Target, Value,
//! };
//!
//! // Services are plain types. Implementing `Attributes` lets operators
//! // pluck named values off of them.
//! struct Settings {
//!     greeting: String,
//! }
//!
//! impl Attributes for Settings {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "greeting" => Some(Value::new(self.greeting.clone())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! // The request context is whatever the container was created with.
//! struct Customer {
//!     name: String,
//! }
//!
//! impl Attributes for Customer {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "name" => Some(Value::new(self.name.clone())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! struct Heading {
//!     person: String,
//!     name: String,
//!     greeting: String,
//! }
//!
//! impl Injectable for Heading {
//!     fn target() -> Target {
//!         Target::record::<Heading>()
//!             .field(FieldSpec::of::<String>("person"))
//!             .field(FieldSpec::of::<String>("name").annotated(
//!                 Annotation::new()
//!                     .then(FetchRequestContext::new())
//!                     .then(PluckAttribute::new("name")),
//!             ))
//!             .field(FieldSpec::of::<String>("greeting").annotated(
//!                 Annotation::new()
//!                     .then(FetchFromScope::of::<Settings>())
//!                     .then(PluckAttribute::new("greeting")),
//!             ))
//!             .construct(|args| {
//!                 Ok(Heading {
//!                     person: args.cloned("person")?,
//!                     name: args.cloned("name")?,
//!                     greeting: args.cloned("greeting")?,
//!                 })
//!             })
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register_attributed(Settings {
//!     greeting: "Hello".to_string(),
//! });
//!
//! let customer = Value::with_attributes(Customer {
//!     name: "Mary".to_string(),
//! });
//! let container = registry.create_container(Some(customer));
//!
//! let heading = container
//!     .inject::<Heading>(&props! { "person" => "Fred".to_string() })
//!     .unwrap();
//! assert_eq!("Fred", heading.person);
//! assert_eq!("Mary", heading.name);
//! assert_eq!("Hello", heading.greeting);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod arguments;
mod container;
mod context;
mod descriptor;
mod error;
mod operators;
mod outcome;
mod pipeline;
mod props;
mod registry;
mod resolver;
mod rules;
mod scope;
mod target;
mod value;

pub use arguments::*;
pub use container::*;
pub use context::*;
pub use descriptor::*;
pub use error::*;
pub use operators::*;
pub use outcome::*;
pub use pipeline::*;
pub use props::*;
pub use registry::*;
pub use resolver::*;
pub use rules::*;
pub use scope::*;
pub use target::*;
pub use value::*;

#[cfg(test)]
mod test_support;
