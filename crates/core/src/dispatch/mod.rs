//! Registry-backed `Domain.action` dispatch.
//!
//! A [`Dispatcher`] maps `(domain, action)` pairs to typed handler closures.
//! It is built once at startup from the driver's capability accessors:
//!
//! ```ignore
//! let dispatcher = Dispatcher::<MyDriver>::builder()
//!     .domain("Network", MyDriver::network, network::register)
//!     .domain("Page", MyDriver::page, |ops| {
//!         ops.op("enable", |page| page.enable())
//!             .op_with("navigate", |page, params: &NavigateParams| page.navigate(params));
//!     })
//!     .build();
//! ```
//!
//! Matching is case-insensitive on both halves of the method name. A method
//! that resolves to nothing yields a response carrying only the request id.


use std::collections::HashMap;
use std::fmt;

use debugger_protocol::{ErrorObject, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::driver::Driver;

type Handler<D> = Box<dyn Fn(&D, Option<&Value>) -> Outcome + Send + Sync>;

/// What a capability operation produced, before it is placed in a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// The operation returned nothing.
	Empty,
	/// The operation returned a value.
	Value(Value),
	/// The operation, or decoding its parameters, failed.
	Failed(String),
}

impl Outcome {
	/// Shapes the outcome into a response for request `id`.
	///
	/// Nothing and `null` both become `{}` so a successful call always carries
	/// an object result.
	pub fn into_response(self, id: u64) -> Response {
		match self {
			Outcome::Failed(message) => Response::error(id, ErrorObject::generic(message)),
			Outcome::Empty | Outcome::Value(Value::Null) => Response::result(id, Value::Object(Map::new())),
			Outcome::Value(value) => Response::result(id, value),
		}
	}
}

/// Conversion from an operation's return type into an [`Outcome`].
///
/// Implemented for the four shapes an operation may have: nothing (`()`), a
/// bare value ([`Json`] or [`serde_json::Value`]), and a fallible value or
/// fallible unit (`Result<T, E>`).
pub trait IntoOutcome {
	fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
	fn into_outcome(self) -> Outcome {
		Outcome::Empty
	}
}

impl IntoOutcome for Value {
	fn into_outcome(self) -> Outcome {
		Outcome::Value(self)
	}
}

/// Wraps an infallible serializable return value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoOutcome for Json<T> {
	fn into_outcome(self) -> Outcome {
		match serde_json::to_value(self.0) {
			Ok(value) => Outcome::Value(value),
			Err(err) => Outcome::Failed(err.to_string()),
		}
	}
}

impl<T: Serialize, E: fmt::Display> IntoOutcome for Result<T, E> {
	fn into_outcome(self) -> Outcome {
		match self {
			Ok(value) => Json(value).into_outcome(),
			Err(err) => Outcome::Failed(err.to_string()),
		}
	}
}

/// Why a method did not resolve to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
	/// The method is not of the form `Domain.action`.
	Malformed,
	UnknownDomain,
	UnknownAction,
}

impl fmt::Display for Miss {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Miss::Malformed => "malformed method",
			Miss::UnknownDomain => "unknown domain",
			Miss::UnknownAction => "unknown action",
		})
	}
}

struct Action<D> {
	name: String,
	handler: Handler<D>,
}

struct Domain<D> {
	name: String,
	actions: HashMap<String, Action<D>>,
}

/// Resolves `Domain.action` requests against a backend of type `D`.
///
/// Holds no mutable state; share it behind an `Arc` or inside the driver.
pub struct Dispatcher<D> {
	domains: HashMap<String, Domain<D>>,
}

impl<D: 'static> Dispatcher<D> {
	pub fn builder() -> DispatcherBuilder<D> {
		DispatcherBuilder {
			domains: HashMap::new(),
		}
	}
}

impl<D: Driver> Dispatcher<D> {
	/// Registers every capability accessor of [`Driver`].
	pub fn standard() -> Self {
		Self::standard_builder().build()
	}

	/// Like [`standard`](Self::standard), leaving room for extra domains.
	pub fn standard_builder() -> DispatcherBuilder<D> {
		Self::builder().domain("Network", D::network, crate::network::register)
	}
}

impl<D> Dispatcher<D> {
	/// Invokes the operation named by `request.method` and builds its response.
	///
	/// Never fails: operation errors and bad parameters become a response
	/// error with code `-1`, and unresolved methods an id-only response.
	pub fn dispatch(&self, driver: &D, request: &Request) -> Response {
		let action = match self.resolve(request) {
			Ok(action) => action,
			Err(miss) => {
				debug!(
					target = "debugger.dispatch",
					id = request.id,
					method = %request.method,
					reason = %miss,
					"unresolved method"
				);
				return Response::empty(request.id);
			}
		};

		let response = (action.handler)(driver, request.params()).into_response(request.id);
		match &response.error {
			Some(error) => debug!(
				target = "debugger.dispatch",
				id = request.id,
				method = %request.method,
				error = %error.message,
				"method failed"
			),
			None => debug!(
				target = "debugger.dispatch",
				id = request.id,
				method = %request.method,
				"responding"
			),
		}
		response
	}

	/// Registered methods as `Domain.action`, in registration spelling, sorted.
	pub fn methods(&self) -> Vec<String> {
		let mut methods: Vec<String> = self
			.domains
			.values()
			.flat_map(|domain| {
				domain
					.actions
					.values()
					.map(move |action| format!("{}.{}", domain.name, action.name))
			})
			.collect();
		methods.sort();
		methods
	}

	fn resolve(&self, request: &Request) -> Result<&Action<D>, Miss> {
		let (domain, action) = request.domain_action().ok_or(Miss::Malformed)?;
		let domain = self
			.domains
			.get(&domain.to_ascii_lowercase())
			.ok_or(Miss::UnknownDomain)?;
		domain
			.actions
			.get(&action.to_ascii_lowercase())
			.ok_or(Miss::UnknownAction)
	}
}

impl<D> fmt::Debug for Dispatcher<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dispatcher")
			.field("methods", &self.methods())
			.finish()
	}
}

/// Collects domains for a [`Dispatcher`].
pub struct DispatcherBuilder<D> {
	domains: HashMap<String, Domain<D>>,
}

impl<D: 'static> DispatcherBuilder<D> {
	/// Adds the domain `name`, reached through `accessor`, and lets `register`
	/// declare its operations.
	///
	/// Registering the same domain twice merges the operations.
	pub fn domain<C>(mut self, name: &str, accessor: fn(&D) -> &C, register: impl FnOnce(&mut DomainOps<'_, D, C>)) -> Self
	where
		C: ?Sized + 'static,
	{
		let domain = self
			.domains
			.entry(name.to_ascii_lowercase())
			.or_insert_with(|| Domain {
				name: name.to_string(),
				actions: HashMap::new(),
			});
		let mut ops = DomainOps {
			domain: &domain.name,
			accessor,
			actions: &mut domain.actions,
		};
		register(&mut ops);
		self
	}

	pub fn build(self) -> Dispatcher<D> {
		Dispatcher {
			domains: self.domains,
		}
	}
}

/// Operation table of one domain, handed to the `register` callback of
/// [`DispatcherBuilder::domain`].
pub struct DomainOps<'a, D, C: ?Sized> {
	domain: &'a str,
	accessor: fn(&D) -> &C,
	actions: &'a mut HashMap<String, Action<D>>,
}

impl<D: 'static, C: ?Sized + 'static> DomainOps<'_, D, C> {
	/// Registers an operation that takes no parameters.
	pub fn op<F, R>(&mut self, name: &str, op: F) -> &mut Self
	where
		F: Fn(&C) -> R + Send + Sync + 'static,
		R: IntoOutcome,
	{
		let accessor = self.accessor;
		self.insert(
			name,
			Box::new(move |driver: &D, _params: Option<&Value>| op(accessor(driver)).into_outcome()),
		)
	}

	/// Registers an operation taking a parameter object of type `P`.
	///
	/// Absent or `null` params invoke the operation with `P::default()`.
	pub fn op_with<F, P, R>(&mut self, name: &str, op: F) -> &mut Self
	where
		F: Fn(&C, &P) -> R + Send + Sync + 'static,
		P: DeserializeOwned + Default,
		R: IntoOutcome,
	{
		let accessor = self.accessor;
		self.insert(
			name,
			Box::new(move |driver: &D, params: Option<&Value>| {
				let params = match params {
					None => P::default(),
					Some(raw) => match P::deserialize(raw) {
						Ok(params) => params,
						Err(err) => return Outcome::Failed(err.to_string()),
					},
				};
				op(accessor(driver), &params).into_outcome()
			}),
		)
	}

	fn insert(&mut self, name: &str, handler: Handler<D>) -> &mut Self {
		let action = Action {
			name: name.to_string(),
			handler,
		};
		if self.actions.insert(name.to_ascii_lowercase(), action).is_some() {
			warn!(
				target = "debugger.dispatch",
				domain = self.domain,
				action = name,
				"operation registered twice, keeping the last one"
			);
		}
		self
	}
}
