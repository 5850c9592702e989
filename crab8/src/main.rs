use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 console emulator")]
pub(crate) struct Args {
    /// Path to the cartridge image to run
    pub(crate) rom: PathBuf,

    /// Instructions executed per 60Hz frame
    #[arg(long, default_value_t = 10)]
    pub(crate) cycles_per_frame: u32,

    /// Window size multiplier per screen pixel
    #[arg(long, default_value_t = 10)]
    pub(crate) scale: u32,

    /// Fix the random-number stream for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run::run(args) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
