use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use fluid_sim_core::FluidError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FluidSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FluidSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FluidSimError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFluidSimError {
    code: FluidSimErrorCode,
    msg: String,
}

impl DefaultFluidSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FluidSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FluidSimErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a rejected scalar parameter.
    pub fn invalid_parameter(param_name: &str, value: f32) -> Self {
        Self {
            code: FluidSimErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' must be finite and non-negative, got {value}"),
        }
    }
}

impl From<FluidError> for DefaultFluidSimError {
    fn from(error: FluidError) -> Self {
        let code = match error {
            FluidError::InvalidDimensions { .. } => FluidSimErrorCode::InvalidDimensions,
            FluidError::InvalidParameter { .. } => FluidSimErrorCode::InvalidParameter,
            FluidError::BufferTooSmall { .. } => FluidSimErrorCode::BufferTooSmall,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl FluidSimError for DefaultFluidSimError {
    fn code(&self) -> FluidSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fluid simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Grid dimensions must be at least 1x1.
    InvalidDimensions = 3,

    /// Invalid scalar parameter passed to function.
    InvalidParameter = 4,

    /// Output buffer is smaller than the exported field.
    BufferTooSmall = 5,
}

impl From<DefaultFluidSimError> for FluidSimErrorCode {
    fn from(error: DefaultFluidSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, FluidSimErrorCode)> = const { RefCell::new((None, FluidSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FluidSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FluidSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the last call succeeded.
///
/// # Thread Safety
/// Error messages are stored per-thread, so each thread has its own independent
/// error state.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error. **DO NOT FREE THIS POINTER**.
///
/// Example:
/// ```c
/// FluidSimInstance* sim = NULL;
/// FluidSimConfig config = fluid_sim_config_default();
/// config.nx = 0;
/// if (fluid_sim_new(config, &sim) != Ok) {
///     const char* error = fluid_sim_get_last_error();
///     if (error) {
///         printf("Fluid sim creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fluid_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `FluidSimErrorCode::Ok` (0) if no error has occurred or the last
/// call on this thread succeeded.
#[no_mangle]
pub extern "C" fn fluid_sim_get_last_error_code() -> FluidSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
