/// Whether a mode handled the invocation or left it to the next one.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
