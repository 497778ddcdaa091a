//! Cache Key Module
//!
//! Validation and canonicalization of cache keys.
//!
//! A key is either a non-empty string or a finite number; numbers are stored
//! under their canonical string form (`0` -> `"0"`, `1.5` -> `"1.5"`).

use serde_json::Value;

use crate::error::{CacheError, Result};
use crate::hash::number_text;

// == Cache Key ==
/// A validated, canonical cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// == Conversion Trait ==
/// Anything that may be used as a key for `set`.
pub trait IntoCacheKey {
    fn into_cache_key(self) -> Result<CacheKey>;
}

// == Validate Key ==
/// Returns true if `key` is a non-empty string or a finite number.
pub fn validate_key<K: IntoCacheKey>(key: K) -> bool {
    key.into_cache_key().is_ok()
}

fn from_text(key: String) -> Result<CacheKey> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be an empty string".to_string()));
    }
    Ok(CacheKey(key))
}

fn from_number(key: f64) -> Result<CacheKey> {
    if !key.is_finite() {
        return Err(CacheError::InvalidKey(format!(
            "numeric key must be finite, got {}",
            number_text(key)
        )));
    }
    Ok(CacheKey(number_text(key)))
}

impl IntoCacheKey for CacheKey {
    fn into_cache_key(self) -> Result<CacheKey> {
        Ok(self)
    }
}

impl IntoCacheKey for &str {
    fn into_cache_key(self) -> Result<CacheKey> {
        from_text(self.to_string())
    }
}

impl IntoCacheKey for String {
    fn into_cache_key(self) -> Result<CacheKey> {
        from_text(self)
    }
}

impl IntoCacheKey for &String {
    fn into_cache_key(self) -> Result<CacheKey> {
        from_text(self.clone())
    }
}

impl IntoCacheKey for f64 {
    fn into_cache_key(self) -> Result<CacheKey> {
        from_number(self)
    }
}

impl IntoCacheKey for f32 {
    fn into_cache_key(self) -> Result<CacheKey> {
        from_number(f64::from(self))
    }
}

macro_rules! impl_integer_key {
    ($($t:ty),*) => {
        $(
            impl IntoCacheKey for $t {
                fn into_cache_key(self) -> Result<CacheKey> {
                    Ok(CacheKey(self.to_string()))
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoCacheKey for &Value {
    fn into_cache_key(self) -> Result<CacheKey> {
        match self {
            Value::String(s) => from_text(s.clone()),
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => Ok(CacheKey(i.to_string())),
                (_, Some(u), _) => Ok(CacheKey(u.to_string())),
                (_, _, Some(f)) => from_number(f),
                _ => Err(CacheError::InvalidKey("unrepresentable number".to_string())),
            },
            Value::Null => Err(CacheError::InvalidKey("null".to_string())),
            Value::Bool(b) => Err(CacheError::InvalidKey(format!("boolean {}", b))),
            Value::Array(_) => Err(CacheError::InvalidKey("array".to_string())),
            Value::Object(_) => Err(CacheError::InvalidKey("object".to_string())),
        }
    }
}

impl IntoCacheKey for Value {
    fn into_cache_key(self) -> Result<CacheKey> {
        (&self).into_cache_key()
    }
}
