//! Factory patch listing.

use clap::Args;
use supersaw_config::{factory_preset_names, get_factory_preset, resolve_patch};

#[derive(Args)]
pub struct PresetsArgs {
    /// Print one patch (factory name or file path) as TOML
    #[arg(long, value_name = "NAME")]
    show: Option<String>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.show {
        Some(name) => show(&name),
        None => {
            list();
            Ok(())
        }
    }
}

fn list() {
    println!("Factory Patches:");
    println!("================");

    for id in factory_preset_names() {
        if let Some(patch) = get_factory_preset(id) {
            let desc = patch.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", id, desc);
        }
    }
}

fn show(name: &str) -> anyhow::Result<()> {
    let patch = resolve_patch(name)?;
    let config = patch.voice_config();

    println!("# {}", patch.name);
    println!(
        "# {:?}, high-pass {}, {:?} detune",
        config.secondary_mode,
        if config.highpass { "on" } else { "off" },
        config.detune_strategy
    );
    print!("{}", patch.to_toml()?);

    Ok(())
}
