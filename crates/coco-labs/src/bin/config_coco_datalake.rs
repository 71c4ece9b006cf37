//! Configures and activates the servers on the Coco data-lake platform.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

use coco_labs::Procedure;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    coco_labs::run(
        Procedure::DataLake,
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
    )
}
