use std::ffi::CString;

use fluid_sim_core::FluidSolver;

use crate::error::{with_last_error_mut, DefaultFluidSimError, FluidSimError, FluidSimErrorCode};
use crate::instance::FluidSimInstance;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FluidSimError` trait.
pub(crate) fn set_last_error(error: &impl FluidSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FluidSimError) -> FluidSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultFluidSimError>) -> Result<T, FluidSimErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Collapse a tracked result into the code returned across the boundary.
#[inline]
pub(crate) fn result_code<T>(result: Result<T, FluidSimErrorCode>) -> FluidSimErrorCode {
    match result {
        Ok(_) => FluidSimErrorCode::Ok,
        Err(code) => code,
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FluidSimErrorCode::Ok;
    });
}

/// Borrow an instance from a caller-supplied pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fluid_sim_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FluidSimInstance,
) -> Result<&'a FluidSimInstance, DefaultFluidSimError> {
    if ptr.is_null() {
        return Err(DefaultFluidSimError::null_pointer("instance"));
    }
    // SAFETY: non-null and, per the contract above, produced by `Box::into_raw`.
    Ok(unsafe { &*ptr })
}

/// Run `f` with shared access to the solver behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fluid_sim_new`.
pub(crate) unsafe fn with_solver<F, R>(
    ptr: *const FluidSimInstance,
    f: F,
) -> Result<R, FluidSimErrorCode>
where
    F: FnOnce(&FluidSolver) -> Result<R, DefaultFluidSimError>,
{
    track_result(unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let solver = instance
            .solver
            .read()
            .map_err(|_| DefaultFluidSimError::lock_poisoned("solver"))?;
        f(&solver)
    }))
}

/// Run `f` with exclusive access to the solver behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fluid_sim_new`.
pub(crate) unsafe fn with_solver_mut<F, R>(
    ptr: *const FluidSimInstance,
    f: F,
) -> Result<R, FluidSimErrorCode>
where
    F: FnOnce(&mut FluidSolver) -> Result<R, DefaultFluidSimError>,
{
    track_result(unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let mut solver = instance
            .solver
            .write()
            .map_err(|_| DefaultFluidSimError::lock_poisoned("solver"))?;
        f(&mut solver)
    }))
}
