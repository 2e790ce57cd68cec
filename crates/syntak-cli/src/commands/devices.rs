//! Output device listing command.

use clap::{Args, Subcommand};
use syntak_io::{default_output_device, list_output_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all output devices
    List,

    /// Show the default output device
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_output_devices()?;

            if devices.is_empty() {
                println!("No output devices found.");
                return Ok(());
            }

            println!("Output Devices");
            println!("==============\n");
            for (idx, device) in devices.iter().enumerate() {
                let default = if device.is_default { " (default)" } else { "" };
                println!(
                    "  [{}] {} ({} Hz, {} ch){}",
                    idx, device.name, device.default_sample_rate, device.channels, default
                );
            }
            println!();
            println!("Tip: select one by partial name:");
            println!("  syntak play --device \"USB\"");
        }

        DevicesCommand::Info => match default_output_device() {
            Some(device) => {
                println!("Default Output:");
                println!("  Name: {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
                println!("  Channels: {}", device.channels);
            }
            None => println!("Default Output: None"),
        },
    }

    Ok(())
}
