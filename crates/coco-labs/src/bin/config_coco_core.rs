//! Configures and activates the servers on the Coco core platform.
//!
//! Delegates to [`coco_labs::run`], which loads configuration, installs
//! logging and walks `cocoMDS2`, `cocoMDS5` and `cocoMDS6`.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

use coco_labs::Procedure;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    coco_labs::run(
        Procedure::Core,
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
    )
}
