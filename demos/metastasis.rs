use lymphatica::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ErrorKind> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let nodes = [1., 2., 0.5].map(|size| LymphNode::new(NodeSize::from(size)));
    let cells = [CancerCell::new(Phenotype::new("invasive"))];

    for policy in [EntrapmentPolicy::LinearBySize, EntrapmentPolicy::Constant] {
        tracing::info!(%policy, "running simulation");
        let results = Simulation::from_policy(policy).run(&nodes, &cells)?;
        println!("Simulation results: {results}");
    }
    Ok(())
}
