//! Interactive menu mode.

use anyhow::Result;

use replcalc::console::StdConsole;
use replcalc::{App, Config};

/// Discover plugins once and run the main menu until the user exits.
///
/// Plugin load failures are reported through the log; the menu starts with
/// whatever loaded.
pub(crate) fn cmd_repl(config: &Config) -> Result<()> {
    let app = App::bootstrap(config);
    let mut console = StdConsole::new();
    app.run(&mut console);
    Ok(())
}
