//! Parameter listing command.

use syntak_synth::{ParamId, WaveType};

pub fn run() -> anyhow::Result<()> {
    println!("Synth Parameters");
    println!("================\n");
    println!(
        "  {:<10} {:>10} {:>10} {:>10}  Unit",
        "Name", "Min", "Max", "Default"
    );

    for id in ParamId::ALL {
        let d = id.descriptor();
        println!(
            "  {:<10} {:>10} {:>10} {:>10}  {}",
            d.name,
            d.min,
            d.max,
            d.default,
            d.unit.suffix()
        );
    }

    println!();
    let waves: Vec<&str> = [WaveType::Sine, WaveType::Square, WaveType::Saw]
        .iter()
        .map(|w| w.name())
        .collect();
    println!("Waves: {} (any other name is silent)", waves.join(", "));
    println!("\nValues outside a range are clamped. Names are case-insensitive.");

    Ok(())
}
