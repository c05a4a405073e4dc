//! Native entry points for hosts that cannot link Rust directly.

#[cfg(feature = "android")]
pub mod android;

use crate::core::matcher;
use std::ffi::{c_char, CStr};

/// C ABI wrapper around [`matcher::matches`].
///
/// Returns `false` for a null pointer or text that is not valid UTF-8.
///
/// # Safety
///
/// `date` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn month_match_is_date_in_month(
    date: *const c_char,
    selected_day: i32,
    selected_month: i32,
    selected_year: i32,
) -> bool {
    if date.is_null() {
        return false;
    }

    match CStr::from_ptr(date).to_str() {
        Ok(date) => matcher::matches(date, selected_day, selected_month, selected_year),
        Err(_) => false,
    }
}
