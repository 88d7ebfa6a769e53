//! Optional observability helpers for strategy flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ringcentral_oauth2.flow`
//!   with the `flow` (operation) and `stage` (call site) fields. Without the
//!   feature every helper is a zero-cost passthrough.

// self
use crate::_prelude::*;

/// Strategy flow kinds observed during a login attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization code exchange delegated to the OAuth2 client.
	Exchange,
	/// Account profile fetch + normalization.
	Profile,
	/// Full login attempt (exchange, profile, verification).
	Authenticate,
}
impl FlowKind {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Exchange => "exchange",
			FlowKind::Profile => "profile",
			FlowKind::Authenticate => "authenticate",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by strategy flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("ringcentral_oauth2.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_kind_labels_are_stable() {
		assert_eq!(FlowKind::Exchange.as_str(), "exchange");
		assert_eq!(FlowKind::Profile.as_str(), "profile");
		assert_eq!(FlowKind::Authenticate.as_str(), "authenticate");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Profile, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
