//! Account profile normalization.
//!
//! A [`Profile`] is constructed fresh for every completed fetch, never cached,
//! and owned by the verification callback after hand-off. Normalization maps
//! the provider's `id` and `mainNumber` fields into typed optional strings and
//! preserves the full decoded payload for callers needing extra fields.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ProfileError};

/// Provider tag attached to every normalized profile.
pub const PROVIDER: &str = "ringcentral";

/// Normalized representation of a RingCentral account.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
	/// Always [`PROVIDER`].
	pub provider: &'static str,
	/// Opaque account identifier, when present in the payload.
	pub id: Option<String>,
	/// Primary phone number for the account, when present in the payload.
	pub main_number: Option<String>,
	/// Full decoded response, preserved for callers needing extra fields.
	pub raw: Value,
}
impl Profile {
	/// Parses an account resource body and normalizes it.
	///
	/// A body that is not valid JSON produces
	/// [`ProfileError::InvalidResponse`] carrying the parse failure and its
	/// JSON path.
	pub fn from_body(body: &str) -> Result<Self, ProfileError> {
		let deserializer = &mut serde_json::Deserializer::from_str(body);
		let raw = serde_path_to_error::deserialize(deserializer)
			.map_err(|source| ProfileError::InvalidResponse { source })?;

		Ok(Self::from_json(raw))
	}

	/// Normalizes an already-decoded payload.
	///
	/// Missing `id`/`mainNumber` fields stay absent instead of failing; numeric
	/// scalars are rendered to strings since the live API returns numeric
	/// account identifiers.
	pub fn from_json(raw: Value) -> Self {
		let id = scalar_field(&raw, "id");
		let main_number = scalar_field(&raw, "mainNumber");

		Self { provider: PROVIDER, id, main_number, raw }
	}
}

fn scalar_field(raw: &Value, key: &str) -> Option<String> {
	match raw.get(key)? {
		Value::String(value) => Some(value.clone()),
		Value::Number(value) => Some(value.to_string()),
		_ => None,
	}
}
