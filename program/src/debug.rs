/// Logs with `pinocchio_log::log!` only when the `debug` feature is enabled.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        pinocchio_log::log!($($arg)*)
    };
}
