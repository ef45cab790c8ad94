use std::process::ExitCode;
use wi_patrol::app;

fn main() -> anyhow::Result<ExitCode> {
    app::main()
}
