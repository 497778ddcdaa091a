//! Hash Code Module
//!
//! Fast, non-cryptographic 32-bit fingerprints used to derive memoization keys.
//!
//! Every value is reduced to a textual form and run through the classic
//! `hash * 31 + c` rolling hash over UTF-16 code units. Collisions are possible.

use serde_json::Value;

// == Shape ==
/// How [`HashCode::of`] treats a value before hashing its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// An explicit null, hashed as `"null"`
    Null,
    /// An absent value, hashed as `"undefined"`
    Undefined,
    /// A sequence with no elements, hashed as `"[]"`
    EmptySequence,
    /// Anything with a textual representation
    Text,
    /// A value with no textual representation; always hashes to `0`
    Untextual,
}

// == Fingerprint Trait ==
/// Values that can be fingerprinted by [`HashCode::of`].
///
/// `write_text` renders the value the way it appears when joined into a list:
/// absent values and empty sequences render as nothing, sequences join their
/// elements with `,`.
pub trait Fingerprint {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn write_text(&self, out: &mut String);
}

// == Hash Code ==
/// Namespace for the fingerprint functions.
pub struct HashCode;

impl HashCode {
    // == Of String ==
    /// Rolling hash over the UTF-16 code units of `s`. Returns `0` for `""`.
    pub fn of_string(s: &str) -> i32 {
        s.encode_utf16().fold(0i32, |hash, unit| {
            // (hash << 5) - hash + c, kept in 32-bit signed range
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
    }

    // == Of ==
    /// Fingerprints any value by its shape and textual representation.
    pub fn of<T: Fingerprint + ?Sized>(value: &T) -> i32 {
        match value.shape() {
            Shape::Null => Self::of_string("null"),
            Shape::Undefined => Self::of_string("undefined"),
            Shape::EmptySequence => Self::of_string("[]"),
            Shape::Text => {
                let mut text = String::new();
                value.write_text(&mut text);
                Self::of_string(&text)
            }
            Shape::Untextual => 0,
        }
    }

    // == Of Function ==
    /// Fingerprints a function by its name and whitespace-free source text.
    pub fn of_function(identity: &FunctionIdentity) -> i32 {
        let source: String = identity
            .source
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        Self::of_string(&format!("{}:{}", identity.name, source))
    }
}

// == Function Identity ==
/// Caller-supplied identity of a memoized function.
///
/// Rust offers no runtime access to a function's source, so the name (and
/// optionally the source text) must be provided explicitly. Whitespace-only
/// edits to `source` keep the same hash; renaming changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionIdentity {
    pub name: String,
    pub source: String,
}

impl FunctionIdentity {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Identity made of the name alone.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

/// Builds a [`FunctionIdentity`] from a name and, optionally, source tokens.
///
/// ```
/// use ttl_memo::function_identity;
///
/// let a = function_identity!(double, |x: i64| x * 2);
/// let b = function_identity!(double, |x: i64| x   *   2);
/// assert_eq!(
///     ttl_memo::HashCode::of_function(&a),
///     ttl_memo::HashCode::of_function(&b)
/// );
/// ```
#[macro_export]
macro_rules! function_identity {
    ($name:ident) => {
        $crate::hash::FunctionIdentity::named(stringify!($name))
    };
    ($name:ident, $($source:tt)+) => {
        $crate::hash::FunctionIdentity::new(stringify!($name), stringify!($($source)+))
    };
}

// == Untextual ==
/// Wraps a value that has no textual representation. Always fingerprints to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Untextual<T>(pub T);

impl<T> Fingerprint for Untextual<T> {
    fn shape(&self) -> Shape {
        Shape::Untextual
    }

    fn write_text(&self, _out: &mut String) {}
}

// == Number Text ==
/// Shortest decimal rendering of a number, as dynamic languages print it.
pub(crate) fn number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    // Exponent form: 1e21 -> "1e+21", 1.5e-7 -> "1.5e-7"
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

// == Fingerprint Implementations ==
impl Fingerprint for str {
    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Fingerprint for String {
    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Fingerprint for bool {
    fn write_text(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

impl Fingerprint for char {
    fn write_text(&self, out: &mut String) {
        out.push(*self);
    }
}

macro_rules! impl_fingerprint_integer {
    ($($t:ty),*) => {
        $(
            impl Fingerprint for $t {
                fn write_text(&self, out: &mut String) {
                    out.push_str(&self.to_string());
                }
            }
        )*
    };
}

impl_fingerprint_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Fingerprint for f64 {
    fn write_text(&self, out: &mut String) {
        out.push_str(&number_text(*self));
    }
}

impl Fingerprint for f32 {
    fn write_text(&self, out: &mut String) {
        out.push_str(&number_text(f64::from(*self)));
    }
}

impl<T: Fingerprint + ?Sized> Fingerprint for &T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn write_text(&self, out: &mut String) {
        (**self).write_text(out)
    }
}

impl<T: Fingerprint> Fingerprint for Option<T> {
    fn shape(&self) -> Shape {
        match self {
            Some(value) => value.shape(),
            None => Shape::Undefined,
        }
    }

    fn write_text(&self, out: &mut String) {
        if let Some(value) = self {
            value.write_text(out);
        }
    }
}

/// Writes elements separated by `,`.
fn write_joined<'a, T, I>(items: I, out: &mut String)
where
    T: Fingerprint + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        item.write_text(out);
    }
}

impl<T: Fingerprint> Fingerprint for [T] {
    fn shape(&self) -> Shape {
        if self.is_empty() {
            Shape::EmptySequence
        } else {
            Shape::Text
        }
    }

    fn write_text(&self, out: &mut String) {
        write_joined(self, out);
    }
}

impl<T: Fingerprint> Fingerprint for Vec<T> {
    fn shape(&self) -> Shape {
        self.as_slice().shape()
    }

    fn write_text(&self, out: &mut String) {
        self.as_slice().write_text(out)
    }
}

impl<T: Fingerprint, const N: usize> Fingerprint for [T; N] {
    fn shape(&self) -> Shape {
        self.as_slice().shape()
    }

    fn write_text(&self, out: &mut String) {
        self.as_slice().write_text(out)
    }
}

/// The empty argument list.
impl Fingerprint for () {
    fn shape(&self) -> Shape {
        Shape::EmptySequence
    }

    fn write_text(&self, _out: &mut String) {}
}

macro_rules! impl_fingerprint_tuple {
    ($first:ident $first_var:ident $(, $rest:ident $rest_var:ident)*) => {
        impl<$first: Fingerprint, $($rest: Fingerprint),*> Fingerprint for ($first, $($rest,)*) {
            fn write_text(&self, out: &mut String) {
                let ($first_var, $($rest_var,)*) = self;
                $first_var.write_text(out);
                $(
                    out.push(',');
                    $rest_var.write_text(out);
                )*
            }
        }
    };
}

impl_fingerprint_tuple!(A a);
impl_fingerprint_tuple!(A a, B b);
impl_fingerprint_tuple!(A a, B b, C c);
impl_fingerprint_tuple!(A a, B b, C c, D d);
impl_fingerprint_tuple!(A a, B b, C c, D d, E e);
impl_fingerprint_tuple!(A a, B b, C c, D d, E e, F f);

impl Fingerprint for Value {
    fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::Array(items) if items.is_empty() => Shape::EmptySequence,
            _ => Shape::Text,
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Value::Null => {}
            Value::Bool(b) => b.write_text(out),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    out.push_str(&i.to_string());
                } else if let Some(u) = n.as_u64() {
                    out.push_str(&u.to_string());
                } else if let Some(f) = n.as_f64() {
                    out.push_str(&number_text(f));
                }
            }
            Value::String(s) => out.push_str(s),
            Value::Array(items) => write_joined(items, out),
            Value::Object(_) => out.push_str("[object Object]"),
        }
    }
}
