//! Common types used throughout the jobdesk backend.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// UserId //
//********//
#[derive(Clone, Copy, Debug)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for UserId {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for UserId {}

impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(UserId(i64::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
/// Unix epoch milliseconds. The database stamps these columns itself, the
/// millisecond resolution keeps distinct writes distinguishable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Self {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_millis() as i64)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for Timestamp {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::cmp::Eq for Timestamp {}

impl std::cmp::Ord for Timestamp {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(&other.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

/// Serialize a Timestamp as an ISO-8601 string for API responses
pub fn serialize_timestamp_iso<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	match chrono::DateTime::from_timestamp_millis(ts.0) {
		Some(dt) => {
			serializer.serialize_str(&dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
		}
		None => Err(serde::ser::Error::custom("timestamp out of range")),
	}
}

// Patch //
//*******//
/// Tri-state update field distinguishing "leave unchanged" from "clear".
///
/// With `#[serde(default)]` a missing JSON field deserializes to `Undefined`,
/// an explicit `null` to `Null`, and a present value to `Value`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Patch::Null)
	}

	pub fn is_value(&self) -> bool {
		matches!(self, Patch::Value(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Patch::Value(v) => Some(v),
			_ => None,
		}
	}

	/// `None` = untouched, `Some(None)` = clear, `Some(Some(v))` = set
	pub fn as_option(&self) -> Option<Option<&T>> {
		match self {
			Patch::Undefined => None,
			Patch::Null => Some(None),
			Patch::Value(v) => Some(Some(v)),
		}
	}

	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
		match self {
			Patch::Undefined => Patch::Undefined,
			Patch::Null => Patch::Null,
			Patch::Value(v) => Patch::Value(f(v)),
		}
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Patch::Undefined | Patch::Null => serializer.serialize_none(),
			Patch::Value(v) => v.serialize(serializer),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(match Option::<T>::deserialize(deserializer)? {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, Deserialize, Serialize)]
	struct Probe {
		#[serde(default)]
		name: Patch<String>,
		#[serde(default)]
		note: Patch<String>,
	}

	#[test]
	fn test_patch_deserialize_tri_state() {
		let probe: Probe = serde_json::from_str(r#"{"name": "Alice", "note": null}"#)
			.expect("probe should parse");
		assert_eq!(probe.name.value().map(String::as_str), Some("Alice"));
		assert!(probe.note.is_null());

		let probe: Probe = serde_json::from_str(r#"{}"#).expect("probe should parse");
		assert!(probe.name.is_undefined());
		assert!(probe.note.is_undefined());
	}

	#[test]
	fn test_patch_as_option() {
		assert_eq!(Patch::<i32>::Undefined.as_option(), None);
		assert_eq!(Patch::<i32>::Null.as_option(), Some(None));
		assert_eq!(Patch::Value(7).as_option(), Some(Some(&7)));
	}

	#[test]
	fn test_patch_map() {
		assert_eq!(Patch::Value(10).map(|v| v * 2), Patch::Value(20));
		assert_eq!(Patch::<i32>::Null.map(|v| v * 2), Patch::Null);
		assert_eq!(Patch::<i32>::Undefined.map(|v| v * 2), Patch::Undefined);
	}

	#[test]
	fn test_timestamp_iso_serialization() {
		#[derive(Serialize)]
		struct Row {
			#[serde(serialize_with = "serialize_timestamp_iso")]
			at: Timestamp,
		}

		let json = serde_json::to_string(&Row { at: Timestamp(1_700_000_000_123) })
			.expect("row should serialize");
		assert_eq!(json, r#"{"at":"2023-11-14T22:13:20.123Z"}"#);
	}

	#[test]
	fn test_timestamp_ordering() {
		assert!(Timestamp(2) > Timestamp(1));
		assert_eq!(Timestamp(5), Timestamp(5));
	}
}

// vim: ts=4
