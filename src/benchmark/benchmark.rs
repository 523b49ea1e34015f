use std::time::Instant;

use crate::simulation::dynamics::CentralGravity;
use crate::simulation::grid::TimeGrid;
use crate::simulation::integrator::integrate;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Time the adaptive integrator across output-grid sizes.
///
/// Uses the canonical Earth scenario over a 100 yr horizon so the work per
/// grid interval stays representative of the full run.
pub fn bench_integrate() {
    let ns = [10_000, 50_000, 100_000, 500_000, 1_000_000];

    let body = Body {
        x: NVec2::new(1.01671123, 0.0),
        v: NVec2::new(0.0, 7.5545175),
    };

    for n in ns {
        let parameters = Parameters {
            G: 58.9639,
            max_t: 100.0,
            samples: n,
            h0: 0.001,
            atol: 1.0e-9,
            rtol: 1.0e-9,
        };

        let model = CentralGravity { G: parameters.G };
        let grid = TimeGrid::new(parameters.max_t, parameters.samples);

        let t0 = Instant::now();
        let result = integrate(&model, body.state(), &grid, &parameters);
        let dt = t0.elapsed().as_secs_f64();

        match result {
            Ok(traj) => {
                let e0 = model.specific_energy(&traj.states[0]);
                let e1 = model.specific_energy(&traj.states[traj.len() - 1]);
                println!(
                    "N = {n:8}, integrate = {dt:8.4} s, energy drift = {:9.3e}",
                    (e1 - e0).abs()
                );
            }
            Err(e) => println!("N = {n:8}, integrate failed: {e}"),
        }
    }
}
