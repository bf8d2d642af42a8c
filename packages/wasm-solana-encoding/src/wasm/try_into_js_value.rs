//! Conversion of parsed message structures into plain JavaScript objects.
//!
//! Addresses and blockhashes become base58 strings, `u64` becomes BigInt and
//! `None` becomes `undefined`. Objects are assembled with [`js_obj!`](crate::js_obj).

use crate::pubkey::{Blockhash, PublicKey};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// A property could not be set on the object being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to set property `{0}` on JS object")]
pub struct JsConversionError(pub &'static str);

impl From<JsConversionError> for JsValue {
    fn from(err: JsConversionError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub trait TryIntoJsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError>;
}

macro_rules! number_into_js {
    ($($ty:ty),*) => {
        $(
            impl TryIntoJsValue for $ty {
                fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
                    Ok(JsValue::from_f64(f64::from(*self)))
                }
            }
        )*
    };
}

number_into_js!(u8, u16, u32);

// lamports and slots exceed 2^53
impl TryIntoJsValue for u64 {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(js_sys::BigInt::from(*self).into())
    }
}

impl TryIntoJsValue for bool {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_bool(*self))
    }
}

impl TryIntoJsValue for str {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for String {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        self.as_str().try_to_js_value()
    }
}

impl TryIntoJsValue for PublicKey {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        self.to_base58().try_to_js_value()
    }
}

impl TryIntoJsValue for Blockhash {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        self.to_base58().try_to_js_value()
    }
}

impl<T: TryIntoJsValue + ?Sized> TryIntoJsValue for &T {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        (**self).try_to_js_value()
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Option<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        self.as_ref()
            .map_or(Ok(JsValue::UNDEFINED), TryIntoJsValue::try_to_js_value)
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for [T] {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        let items = self
            .iter()
            .map(TryIntoJsValue::try_to_js_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items.into_iter().collect::<js_sys::Array>().into())
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Vec<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        self.as_slice().try_to_js_value()
    }
}

/// Set `key` on `object` to the converted `value`.
pub fn set_property(
    object: &js_sys::Object,
    key: &'static str,
    value: &dyn TryIntoJsValue,
) -> Result<(), JsConversionError> {
    let value = value.try_to_js_value()?;
    js_sys::Reflect::set(object, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|_| JsConversionError(key))
}

/// Build a JavaScript object from `"key" => value` pairs, where every value
/// implements [`TryIntoJsValue`]. Evaluates to `Result<JsValue, JsConversionError>`.
#[macro_export]
macro_rules! js_obj {
    ( $( $key:literal => $value:expr ),* $(,)? ) => {{
        let object = js_sys::Object::new();
        $(
            $crate::wasm::try_into_js_value::set_property(&object, $key, &$value)?;
        )*
        Ok::<wasm_bindgen::JsValue, $crate::wasm::try_into_js_value::JsConversionError>(
            object.into(),
        )
    }};
}
