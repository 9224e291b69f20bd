// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2023 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-FileCopyrightText: © 2023 Siemens AG
// SPDX-License-Identifier: MIT
use clap::Parser;

#[derive(Debug, clap::Parser)]
#[command(long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from("fill_level.toml"))]
    config_file: String,
    #[arg(short, long, default_value_t = String::from(""))]
    template: String,
}

fn read_conf_from_file(filename: &str) -> anyhow::Result<lwm2m_emu::EmuSettings> {
    Ok(toml::from_str::<lwm2m_emu::EmuSettings>(&std::fs::read_to_string(filename)?)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Create a template emulator configuration and exit.
    if !args.template.is_empty() {
        lwm2m_emu::create_template(&args.template, lwm2m_emu::emu_default_conf().as_str())?;
        return Ok(());
    }

    let conf = read_conf_from_file(&args.config_file)?;
    log::info!("Starting fill level sensor emulator, {} sensor(s)", conf.sensors.len());

    let reports = lwm2m_emu::emu_main(conf)?;
    let failed = reports.iter().filter(|report| report.result_code != 0).count();
    if failed > 0 {
        anyhow::bail!("{} sensor update(s) failed", failed);
    }
    Ok(())
}
