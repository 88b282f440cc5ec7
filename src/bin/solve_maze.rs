use maze_policy::mdp::{
    policy_table, values_table, Grid, PolicyIteration, PolicyIterationConfig, PolicyStyle,
};

fn main() -> maze_policy::Result<()> {
    let grid = Grid::reference();
    let config = PolicyIterationConfig::default();

    println!("maze");
    print!("{grid}");

    let solution = PolicyIteration::new(&grid, config)?.run_with(|report, values, policy| {
        println!();
        println!(
            "iteration {} ({} sweeps, {} cells changed)",
            report.iteration, report.sweeps, report.changed
        );
        println!("v");
        print!("{}", values_table(&grid, values));
        println!("pi");
        print!("{}", policy_table(&grid, policy, PolicyStyle::Codes));
    })?;

    println!();
    println!("converged after {} iterations", solution.iterations);
    print!("{}", policy_table(&grid, &solution.policy, PolicyStyle::Symbols));
    Ok(())
}
