//! Error type shared by the engine and all adapters.

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	// store
	/// The store is unreachable or rejected the query
	DbError,
	/// The caller's deadline passed before the store answered
	Timeout,
	/// The caller cancelled the operation
	Cancelled,
	/// Overrides cannot be written through this resolver
	ReadOnly,

	// codec
	/// A stored override is not a valid encoding for the entry's type
	DecodeError { key: Box<str>, reason: String },
	/// A value could not be encoded (a defect, not a runtime condition)
	EncodeError { key: Box<str>, reason: String },

	// declarations
	ConfigError(String),
	UnknownEntry(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// True for failures that originate in the persistence layer
	pub fn is_store_error(&self) -> bool {
		matches!(self, Error::DbError | Error::Timeout | Error::Cancelled | Error::ReadOnly)
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::DbError => write!(f, "store error"),
			Error::Timeout => write!(f, "store error: deadline exceeded"),
			Error::Cancelled => write!(f, "store error: operation cancelled"),
			Error::ReadOnly => write!(f, "store error: runtime overrides are read-only here"),
			Error::DecodeError { key, reason } => {
				write!(f, "decode override for '{}': {}", key, reason)
			}
			Error::EncodeError { key, reason } => {
				write!(f, "encode value for '{}': {}", key, reason)
			}
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::UnknownEntry(key) => write!(f, "unknown entry: {}", key),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}


// vim: ts=4
