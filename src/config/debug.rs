//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so the
//! CLI output stays quiet unless someone is chasing a problem.

pub struct DebugFlags {
    /// Emit one line per endpoint fetch attempt (source, path, outcome).
    pub print_fetch: bool,
    /// Emit per-series counts after colorizing (highlighted, greyed, unknown).
    pub print_colorize_summary: bool,
    /// Emit stale fetch results that were dropped by the view.
    pub print_stale_results: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch: false,
    print_colorize_summary: false,
    print_stale_results: false,
};
