//! Codecs between typed entry values and stored override bytes.

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

/// Converts an entry value to and from its stored byte form.
///
/// Implementations must round-trip: `decode(&encode(v)?)? == v` for every
/// legal value. Errors carry a human-readable reason; the entry attaches its
/// key when turning them into [`Error::DecodeError`](crate::error::Error).
pub trait Codec: Send + Sync + 'static {
	type Value;

	fn encode(value: &Self::Value) -> Result<Vec<u8>, String>;

	fn decode(bytes: &[u8]) -> Result<Self::Value, String>;
}

/// JSON via serde. Used for structured settings objects.
pub struct JsonCodec<T>(PhantomData<fn() -> T>);

impl<T> Codec for JsonCodec<T>
where
	T: Serialize + DeserializeOwned + 'static,
{
	type Value = T;

	fn encode(value: &T) -> Result<Vec<u8>, String> {
		serde_json::to_vec(value).map_err(|e| e.to_string())
	}

	fn decode(bytes: &[u8]) -> Result<T, String> {
		serde_json::from_slice(bytes).map_err(|e| e.to_string())
	}
}

/// UTF-8 text via `Display` / `FromStr`. Used for scalar entries.
pub struct TextCodec<T>(PhantomData<fn() -> T>);

impl<T> Codec for TextCodec<T>
where
	T: Display + FromStr + 'static,
	T::Err: Display,
{
	type Value = T;

	fn encode(value: &T) -> Result<Vec<u8>, String> {
		Ok(value.to_string().into_bytes())
	}

	fn decode(bytes: &[u8]) -> Result<T, String> {
		let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
		text.parse().map_err(|e: T::Err| format!("invalid value {:?}: {}", text, e))
	}
}

/// Render a value as a JSON string for display purposes
pub fn json_string<T: Serialize + ?Sized>(value: &T) -> String {
	serde_json::to_string(value).unwrap_or_else(|e| format!("<invalid json: {}>", e))
}


// vim: ts=4
