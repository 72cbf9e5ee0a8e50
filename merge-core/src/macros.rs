macro_rules! ensure_eq {
    ($a:expr, $b:expr) => {
        ensure!($a == $b)
    };
    ($a:expr, $b:expr, $($arg:tt)*) => {
        ensure!($a == $b, $($arg)*)
    };
}

/// panics unconditionally, marking the site as a logic error in this crate
/// rather than a condition a caller could have avoided
macro_rules! bug {
    ($($arg:tt)*) => {{
        eprintln!("BUG!");
        unreachable!($($arg)*)
    }};
}
