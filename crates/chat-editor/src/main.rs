mod agent;
mod app;
mod config;
mod editor;
mod events;
mod keymap;
mod logging;
#[cfg(test)]
mod test_utils;
mod ui;

fn main() -> std::io::Result<()> {
    app::run()
}
