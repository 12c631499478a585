mod command;
mod logging;
mod util;

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    command::run()
}
