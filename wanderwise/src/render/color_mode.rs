use clap::ValueEnum;

/// When to emit ANSI colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Only when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}
