//! FFI bindings for Mood Insights
//!
//! C-compatible functions for calling the analyzer from other languages.
//! Inputs are null-terminated JSON strings; returned strings are allocated
//! here and must be released with `mood_free_string`. Journals are scored
//! with the bundled lexicon scorer.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::AnalysisConfig;
use crate::pipeline::MoodAnalyzer;
use crate::sentiment::LexiconSentiment;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

unsafe fn run_analysis(analyzer: &MoodAnalyzer, json: *const c_char) -> *mut c_char {
    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match analyzer.analyze_json(&json_str, &LexiconSentiment::new()) {
        Ok(insights) => string_to_cstr(&insights),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Analyze a JSON array of mood entries and return a JSON array of insights.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mood_free_string`.
/// - Returns NULL on error; call `mood_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mood_analyze_json(json: *const c_char) -> *mut c_char {
    clear_last_error();
    run_analysis(&MoodAnalyzer::new(), json)
}

// ============================================================================
// Configured API
// ============================================================================

/// Opaque handle to a configured analyzer
pub struct MoodAnalyzerHandle {
    analyzer: MoodAnalyzer,
}

/// Create an analyzer from a JSON configuration (NULL for defaults).
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string.
/// - The returned handle must be freed with `mood_analyzer_free`.
/// - Returns NULL on error; call `mood_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mood_analyzer_new(config_json: *const c_char) -> *mut MoodAnalyzerHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        AnalysisConfig::default()
    } else {
        let Some(json) = cstr_to_string(config_json) else {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        };
        match AnalysisConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    match MoodAnalyzer::with_config(config) {
        Ok(analyzer) => Box::into_raw(Box::new(MoodAnalyzerHandle { analyzer })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free an analyzer handle.
///
/// # Safety
/// - `analyzer` must be a handle returned by `mood_analyzer_new`, or NULL.
#[no_mangle]
pub unsafe extern "C" fn mood_analyzer_free(analyzer: *mut MoodAnalyzerHandle) {
    if !analyzer.is_null() {
        drop(Box::from_raw(analyzer));
    }
}

/// Analyze entries with a configured analyzer.
///
/// # Safety
/// - `analyzer` must be a valid handle from `mood_analyzer_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mood_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mood_analyzer_analyze(
    analyzer: *mut MoodAnalyzerHandle,
    json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let Some(handle) = analyzer.as_ref() else {
        set_last_error("Invalid analyzer handle");
        return ptr::null_mut();
    };
    run_analysis(&handle.analyzer, json)
}

// ============================================================================
// Memory and Errors
// ============================================================================

/// Free a string returned by a mood function.
///
/// # Safety
/// - `ptr` must be a pointer returned by a mood function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn mood_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message.
///
/// # Safety
/// - The returned pointer is valid until the next mood call on this thread.
/// - Do NOT free the returned pointer. Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn mood_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn mood_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> CString {
        let entries: Vec<String> = (1..=8)
            .map(|d| {
                format!(
                    r#"{{"date": "2024-09-{:02}", "mood_score": {}, "journal": "{}"}}"#,
                    d,
                    if d == 8 { 9 } else { 6 },
                    if d == 8 { "awful terrible day, so sad" } else { "" }
                )
            })
            .collect();
        CString::new(format!("[{}]", entries.join(","))).unwrap()
    }

    #[test]
    fn test_ffi_analyze_json() {
        let json = sample_entries();
        unsafe {
            let result = mood_analyze_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value[0]["type"], "info");
            assert!(result_str.contains("nlp_insight"));
            assert!(result_str.contains("September 08"));

            mood_free_string(result);
        }
    }

    #[test]
    fn test_ffi_analyzer_lifecycle() {
        let config = CString::new(r#"{"min_records": 10}"#).unwrap();
        let json = sample_entries();
        unsafe {
            let analyzer = mood_analyzer_new(config.as_ptr());
            assert!(!analyzer.is_null());

            let result = mood_analyzer_analyze(analyzer, json.as_ptr());
            assert!(!result.is_null());
            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("10 days of data"));

            mood_free_string(result);
            mood_analyzer_free(analyzer);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid = CString::new(r#"[{"date": "2024-01-01", "mood_score": 42}]"#).unwrap();
            let result = mood_analyze_json(invalid.as_ptr());
            assert!(result.is_null());

            let error = mood_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("outside 1-10"));

            let bad_config = CString::new(r#"{"rolling_window": 0}"#).unwrap();
            assert!(mood_analyzer_new(bad_config.as_ptr()).is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = CStr::from_ptr(mood_version()).to_str().unwrap();
            assert!(!version.is_empty());
        }
    }
}
