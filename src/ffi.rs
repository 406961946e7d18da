//! C FFI layer for cross-language interoperability.

use crate::assemble::{assemble_with_config, Assembly};
use crate::config::ExtractConfig;
use crate::render::{create_renderer, MathBackend};
use crate::scanner::ScanConfig;
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::ptr;

/// Configuration for extraction.
#[repr(C)]
pub struct MathmlExtractConfig {
    /// Math backend: 0 = MathML (latex2mathml), 1 = KaTeX
    pub math_backend: c_int,
    /// Whether to normalize spans on worker threads
    pub parallel: c_int,
    /// Whether `\$` is literal text rather than a delimiter
    pub skip_escaped_dollars: c_int,
}

impl Default for MathmlExtractConfig {
    fn default() -> Self {
        Self {
            math_backend: 0,
            parallel: 0,
            skip_escaped_dollars: 0,
        }
    }
}

impl MathmlExtractConfig {
    fn to_config(&self) -> ExtractConfig {
        ExtractConfig {
            backend: match self.math_backend {
                1 => MathBackend::KaTeX,
                _ => MathBackend::MathML,
            },
            parallel: self.parallel != 0,
            scan: ScanConfig {
                skip_escaped_dollars: self.skip_escaped_dollars != 0,
            },
            ..Default::default()
        }
    }
}

/// Result type for FFI operations.
#[repr(C)]
pub struct MathmlExtractResult {
    /// Pointer to result string (caller must free with mathml_extract_free_string)
    pub data: *mut c_char,
    /// Error message if data is null (caller must free with mathml_extract_free_string)
    pub error: *mut c_char,
    /// Number of math spans that were skipped because they failed to normalize
    pub failure_count: c_int,
    /// One line per skipped span explaining why, or null when none failed
    /// (freed by mathml_extract_free_result)
    pub diagnostics: *mut c_char,
}

impl MathmlExtractResult {
    fn ok(assembly: Assembly) -> Self {
        let diagnostics = if assembly.failures.is_empty() {
            ptr::null_mut()
        } else {
            let lines: Vec<String> = assembly.failures.iter().map(|f| f.to_string()).collect();
            into_c_string(lines.join("\n"))
        };
        Self {
            data: into_c_string(assembly.output),
            error: ptr::null_mut(),
            failure_count: c_int::try_from(assembly.failures.len()).unwrap_or(c_int::MAX),
            diagnostics,
        }
    }

    fn err(error: String) -> Self {
        let c_string =
            CString::new(error).unwrap_or_else(|_| CString::new("Unknown error").unwrap());
        Self {
            data: ptr::null_mut(),
            error: c_string.into_raw(),
            failure_count: 0,
            diagnostics: ptr::null_mut(),
        }
    }
}

// Interior NULs cannot cross the boundary; drop them rather than the text
fn into_c_string(text: String) -> *mut c_char {
    let c_string = CString::new(text).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c_string.into_raw()
}

/// Extract normalized MathML from a text document.
///
/// On success `data` holds the joined fragments, or the "no math" sentinel,
/// and `diagnostics` describes every skipped span.
///
/// # Safety
///
/// - `input` must be a valid null-terminated UTF-8 string.
/// - `config` must be null or a valid pointer to MathmlExtractConfig.
/// - The returned result must be freed with `mathml_extract_free_result`.
#[no_mangle]
pub unsafe extern "C" fn mathml_extract_text(
    input: *const c_char,
    config: *const MathmlExtractConfig,
) -> MathmlExtractResult {
    if input.is_null() {
        return MathmlExtractResult::err("Null input pointer".to_string());
    }

    let input = match CStr::from_ptr(input).to_str() {
        Ok(s) => s,
        Err(_) => return MathmlExtractResult::err("Invalid UTF-8 input".to_string()),
    };

    let extract_config = if config.is_null() {
        ExtractConfig::default()
    } else {
        (*config).to_config()
    };

    let renderer = match create_renderer(extract_config.backend) {
        Ok(r) => r,
        Err(e) => return MathmlExtractResult::err(e.to_string()),
    };

    let assembly = assemble_with_config(input, &renderer, &extract_config);
    MathmlExtractResult::ok(assembly)
}

/// Free a string returned by mathml_extract functions.
///
/// # Safety
///
/// - `s` must be a pointer returned by a mathml_extract function, or null.
#[no_mangle]
pub unsafe extern "C" fn mathml_extract_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Free a result struct.
///
/// # Safety
///
/// - `result` must be a valid MathmlExtractResult.
#[no_mangle]
pub unsafe extern "C" fn mathml_extract_free_result(result: MathmlExtractResult) {
    mathml_extract_free_string(result.data);
    mathml_extract_free_string(result.error);
    mathml_extract_free_string(result.diagnostics);
}

/// Get the library version.
///
/// # Safety
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn mathml_extract_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr() as *const c_char
}

// Generate C header content for documentation
/// ```c
/// // mathml_extract.h
/// #ifndef MATHML_EXTRACT_H
/// #define MATHML_EXTRACT_H
///
/// typedef struct {
///     int math_backend;          // 0 = MathML, 1 = KaTeX
///     int parallel;              // 0 = sequential, 1 = worker threads
///     int skip_escaped_dollars;  // 0 = \$ is a delimiter, 1 = literal
/// } MathmlExtractConfig;
///
/// typedef struct {
///     char* data;
///     char* error;
///     int failure_count;
///     char* diagnostics;  // one line per skipped span, or NULL
/// } MathmlExtractResult;
///
/// MathmlExtractResult mathml_extract_text(const char* input, const MathmlExtractConfig* config);
/// void mathml_extract_free_string(char* s);
/// void mathml_extract_free_result(MathmlExtractResult result);
/// const char* mathml_extract_version(void);
///
/// #endif
/// ```
const _: () = ();
