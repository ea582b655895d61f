mod command;
mod presets;
mod text;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
