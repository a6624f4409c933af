/// Drop this process to below-normal priority so the overlay never
/// competes with foreground applications for CPU time.
///
/// Failure is logged and otherwise ignored.
#[cfg(target_os = "windows")]
pub fn lower_process_priority() {
    use windows::Win32::System::Threading::{
        GetCurrentProcess, SetPriorityClass, BELOW_NORMAL_PRIORITY_CLASS,
    };
    unsafe {
        if let Err(e) = SetPriorityClass(GetCurrentProcess(), BELOW_NORMAL_PRIORITY_CLASS) {
            tracing::warn!("failed to lower process priority: {e}");
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub fn lower_process_priority() {}
