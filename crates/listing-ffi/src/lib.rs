//! C FFI bindings for listing-core
//!
//! A C-compatible API for hosts (web front-ends, desktop shells) that read
//! the uploaded file themselves and hand the core CSV text.

use listing_core::{parse_csv_str, to_csv_string, to_json, transform};
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: impl Into<String>) {
    let message = CString::new(message.into()).ok();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Parse `input` as CSV, convert it and render the result with `render`
///
/// # Safety
/// - `input` must be a valid C string or null
unsafe fn convert_with<F>(input: *const c_char, render: F) -> *mut c_char
where
    F: FnOnce(&listing_core::Table) -> Result<String, String>,
{
    clear_last_error();
    if input.is_null() {
        set_last_error("input is null");
        return ptr::null_mut();
    }

    let content = match CStr::from_ptr(input).to_str() {
        Ok(s) => s,
        Err(e) => {
            set_last_error(format!("input is not valid UTF-8: {}", e));
            return ptr::null_mut();
        }
    };

    let rendered = parse_csv_str(content, "<ffi>")
        .and_then(|table| transform(&table))
        .map_err(|e| e.to_string())
        .and_then(|output| render(&output));

    match rendered.and_then(|s| CString::new(s).map_err(|e| e.to_string())) {
        Ok(s) => s.into_raw(),
        Err(message) => {
            set_last_error(message);
            ptr::null_mut()
        }
    }
}

/// Convert CSV text and return the converted table as CSV text
///
/// # Safety
/// - `input` must be a valid C string or null
/// - Returns null on error; see `lc_last_error`
/// - Caller must free the returned string with `lc_free_string`
#[no_mangle]
pub unsafe extern "C" fn lc_convert_csv(input: *const c_char) -> *mut c_char {
    convert_with(input, |table| to_csv_string(table).map_err(|e| e.to_string()))
}

/// Convert CSV text and return the converted rows as a JSON array
///
/// # Safety
/// - `input` must be a valid C string or null
/// - Returns null on error; see `lc_last_error`
/// - Caller must free the returned string with `lc_free_string`
#[no_mangle]
pub unsafe extern "C" fn lc_convert_csv_to_json(input: *const c_char) -> *mut c_char {
    convert_with(input, |table| {
        serde_json::to_string(&to_json(table)).map_err(|e| e.to_string())
    })
}

/// Message of the last failed call on this thread, or null
///
/// # Safety
/// - Caller must free the returned string with `lc_free_string`
#[no_mangle]
pub unsafe extern "C" fn lc_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|s| s.clone().into_raw())
            .unwrap_or(ptr::null_mut())
    })
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a lc_* function or null
#[no_mangle]
pub unsafe extern "C" fn lc_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
