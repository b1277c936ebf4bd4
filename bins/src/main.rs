use eyre::Context as _;
use ledger::Ledger;
use log::info;
use script::{Runner, Script};
use storage::Storage;

mod script;

fn main() -> eyre::Result<()> {
    let env = env::Env::load()?;
    pretty_env_logger::formatted_builder()
        .parse_filters(env.rust_log())
        .init();
    color_eyre::install()?;

    let Some(path) = std::env::args().nth(1) else {
        println!("usage: ledger-cli <script.json>");
        return Ok(());
    };
    let script = Script::load(&path)?;

    info!("opening {}", env.gym_name());
    let ledger = Ledger::new(Storage::new(), env.config());
    let mut tx = ledger.tx_at(script.now()?);
    if !env.gym_balance().is_zero() {
        ledger
            .deposit(&mut tx, env.gym_balance(), "initial balance")
            .context("Failed to deposit initial balance")?;
    }

    let reports = Runner::new(&ledger).run(&mut tx, &script.commands);
    script::print(&ledger, &reports);
    Ok(())
}
