use essim::{bench_integrate, run_2d, Scenario, ScenarioConfig};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "earth_sun.yaml")]
    file_name: String,

    /// Time the integrator across grid sizes instead of animating
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_integrate();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    // Batch phase: the whole trajectory is produced before any frame
    let trajectory = scenario.integrate()?;

    let model = scenario.model();
    let e0 = model.specific_energy(&trajectory.states[0]);
    let e1 = model.specific_energy(&trajectory.states[trajectory.len() - 1]);
    println!(
        "integrated {} samples over {} yr, energy drift {:.3e}",
        trajectory.len(),
        scenario.parameters.max_t,
        (e1 - e0).abs()
    );

    run_2d(scenario, trajectory);

    Ok(())
}
